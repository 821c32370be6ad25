use super::*;
use crate::foundation::core::Fps;
use crate::script::model::ActionKind;
use crate::timeline::typing::reveal_cutoff_scan;

fn fps30() -> Fps {
    Fps::new(30).unwrap()
}

fn two_step_timeline() -> Timeline {
    Timeline::build(
        &[
            CodeAction::new("a.ts", ActionKind::Create, "const a = 1;", 8.0),
            CodeAction::new("b.ts", ActionKind::Update, "function b() {\n  return 2;\n}", 10.0),
        ],
        fps30(),
    )
    .unwrap()
}

#[test]
fn second_action_starts_exactly_at_its_boundary() {
    let tl = two_step_timeline();
    let st = FrameResolver::resolve_action(&tl, FrameIndex(240));
    assert_eq!(st.action_index, Some(1));
    assert_eq!(st.active_action.unwrap().file, "b.ts");
    assert_eq!(st.relative_frame, 0);
    assert_eq!(st.revealed_content, "");

    let before = FrameResolver::resolve_action(&tl, FrameIndex(239));
    assert_eq!(before.action_index, Some(0));
    assert_eq!(before.relative_frame, 239);
    assert_eq!(before.revealed_content, "const a = 1;");
}

#[test]
fn out_of_range_frames_are_idle() {
    let tl = two_step_timeline();
    for f in [540, 541, 10_000, u64::MAX / 2] {
        let st = FrameResolver::resolve_action(&tl, FrameIndex(f));
        assert_eq!(st.active_action, None);
        assert_eq!(st.revealed_content, "");
    }
}

#[test]
fn empty_timeline_is_always_idle() {
    let tl = Timeline::build(&[], fps30()).unwrap();
    let opts = PanelOpts::default();
    for f in [0, 1, 30, 9_000] {
        let st = FrameResolver::state_at(&tl, FrameIndex(f), &opts);
        assert!(st.active_action.is_none());
        assert_eq!(st.status_label, "READY");
        assert_eq!(st.caret, Caret { line: 1, column: 0 });
    }
}

#[test]
fn reveal_matches_reference_walk() {
    let tl = two_step_timeline();
    let iv = &tl.intervals()[1];
    for f in iv.start_frame.0..iv.end_frame.0 {
        let st = FrameResolver::resolve_action(&tl, FrameIndex(f));
        let cutoff = reveal_cutoff_scan(&iv.action.content, st.relative_frame, fps30());
        assert_eq!(st.revealed_content.chars().count(), cutoff);
    }
}

#[test]
fn reveal_is_monotonic_within_an_action() {
    let tl = two_step_timeline();
    let iv = &tl.intervals()[1];
    let mut prev = 0;
    for f in iv.start_frame.0..iv.end_frame.0 {
        let len = FrameResolver::resolve_action(&tl, FrameIndex(f))
            .revealed_content
            .len();
        assert!(len >= prev);
        assert!(len <= iv.action.content.len());
        prev = len;
    }
}

#[test]
fn delete_content_reveals_like_create() {
    let content = "old code";
    let mk = |kind| {
        Timeline::build(&[CodeAction::new("x", kind, content, 3.0)], fps30()).unwrap()
    };
    let del = mk(ActionKind::Delete);
    let cre = mk(ActionKind::Create);
    for f in 0..90 {
        assert_eq!(
            FrameResolver::resolve_action(&del, FrameIndex(f)).revealed_content,
            FrameResolver::resolve_action(&cre, FrameIndex(f)).revealed_content
        );
    }
}

#[test]
fn resolve_rejects_mismatched_fps() {
    let tl = two_step_timeline();
    let opts = PanelOpts::default();
    let q = FrameQuery::new(10, 60).unwrap();
    let err = FrameResolver::resolve(&tl, q, &opts).unwrap_err();
    assert!(matches!(err, CodecastError::Validation(_)));

    let ok = FrameResolver::resolve(&tl, FrameQuery::new(10, 30).unwrap(), &opts).unwrap();
    assert_eq!(ok.frame, FrameIndex(10));
}

#[test]
fn resolve_rejects_invalid_panel_opts() {
    let tl = two_step_timeline();
    let q = FrameQuery::new(10, 30).unwrap();

    let zero_cursor = PanelOpts {
        cursor_half_period_secs: 0.0,
        ..PanelOpts::default()
    };
    let err = FrameResolver::resolve(&tl, q, &zero_cursor).unwrap_err();
    assert!(matches!(err, CodecastError::Validation(_)));
    assert!(err.to_string().contains("cursor_half_period_secs"));

    let nan_breathing = PanelOpts {
        breathing_half_period_secs: f64::NAN,
        ..PanelOpts::default()
    };
    assert!(FrameResolver::resolve(&tl, q, &nan_breathing).is_err());

    let negative_feed = PanelOpts {
        terminal_line_interval_secs: -0.5,
        ..PanelOpts::default()
    };
    assert!(FrameResolver::resolve(&tl, q, &negative_feed).is_err());
}

#[test]
fn state_combines_clocks_caret_and_status() {
    let tl = two_step_timeline();
    let opts = PanelOpts::default();

    let end = tl.intervals()[1].end_frame.0 - 1;
    let st = FrameResolver::state_at(&tl, FrameIndex(end), &opts);
    assert_eq!(st.revealed_content, "function b() {\n  return 2;\n}");
    assert_eq!(st.caret, Caret { line: 3, column: 1 });
    assert_eq!(st.status_label, "UPDATE");
    assert_eq!(st.terminal_lines.len(), DEFAULT_TERMINAL_LOG.len());

    let first = FrameResolver::state_at(&tl, FrameIndex(0), &opts);
    assert!(first.cursor_visible);
    assert_eq!(first.breathing_scale, 1.0);
    assert_eq!(first.status_label, "CREATE");
    assert_eq!(first.terminal_lines, &opts.terminal_log[..1]);
}

#[test]
fn resolution_is_order_independent() {
    let tl = two_step_timeline();
    let opts = PanelOpts::default();
    let forward: Vec<String> = (0..600)
        .map(|f| serde_json::to_string(&FrameResolver::state_at(&tl, FrameIndex(f), &opts)).unwrap())
        .collect();
    for f in (0..600u64).rev().step_by(7) {
        let again =
            serde_json::to_string(&FrameResolver::state_at(&tl, FrameIndex(f), &opts)).unwrap();
        assert_eq!(again, forward[f as usize]);
    }
}

#[test]
fn caret_counts_chars_on_last_line() {
    assert_eq!(Caret::after(""), Caret { line: 1, column: 0 });
    assert_eq!(Caret::after("ab\ncdé"), Caret { line: 2, column: 3 });
    assert_eq!(Caret::after("ab\n"), Caret { line: 2, column: 0 });
}

#[test]
fn panel_opts_fill_defaults_and_validate() {
    let opts = PanelOpts::from_reader(r#"{ "terminal_log": ["$ cargo run"] }"#.as_bytes()).unwrap();
    assert_eq!(opts.terminal_log, vec!["$ cargo run".to_string()]);
    assert_eq!(opts.cursor_half_period_secs, 0.53);

    let err = PanelOpts::from_reader(r#"{ "cursor_half_period_secs": 0 }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, CodecastError::Validation(_)));
    assert!(matches!(
        PanelOpts::from_reader("[".as_bytes()).unwrap_err(),
        CodecastError::Serde(_)
    ));
}
