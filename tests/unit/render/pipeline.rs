use super::*;
use crate::foundation::core::Fps;
use crate::script::model::{ActionKind, CodeAction};

fn timeline() -> Timeline {
    Timeline::build(
        &[
            CodeAction::new("a.ts", ActionKind::Create, "const a = { b: [1, 2] };", 2.0),
            CodeAction::new("a.ts", ActionKind::Delete, "const a = {};", 1.5),
        ],
        Fps::new(30).unwrap(),
    )
    .unwrap()
}

#[test]
fn sequential_covers_render_range_in_order() {
    let tl = timeline();
    let opts = PanelOpts::default();
    let (frames, stats) = resolve_render_range(&tl, &opts, &ResolveThreading::default()).unwrap();
    assert_eq!(frames.len(), 105);
    assert_eq!(stats.frames_total, 105);
    assert_eq!(stats.frames_active, 105);
    for (i, st) in frames.iter().enumerate() {
        assert_eq!(st.frame, FrameIndex(i as u64));
    }
}

#[test]
fn parallel_matches_sequential_for_chunk_sizes() {
    let tl = timeline();
    let opts = PanelOpts::default();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(150)).unwrap();
    let (seq, seq_stats) =
        resolve_frames(&tl, range, &opts, &ResolveThreading::default()).unwrap();

    for chunk_size in [0usize, 1, 7, 64, 1000] {
        let threading = ResolveThreading {
            parallel: true,
            chunk_size,
            threads: Some(4),
        };
        let (par, par_stats) = resolve_frames(&tl, range, &opts, &threading).unwrap();
        assert_eq!(seq, par);
        assert_eq!(seq_stats, par_stats);
    }
    // 45 trailing frames lie past the last action.
    assert_eq!(seq_stats.frames_active, 105);
}

#[test]
fn zero_threads_is_rejected() {
    let tl = timeline();
    let opts = PanelOpts::default();
    let threading = ResolveThreading {
        parallel: true,
        chunk_size: 8,
        threads: Some(0),
    };
    let err = resolve_render_range(&tl, &opts, &threading).unwrap_err();
    assert!(matches!(err, CodecastError::Validation(_)));
}

#[test]
fn empty_timeline_resolves_no_frames() {
    let tl = Timeline::build(&[], Fps::new(30).unwrap()).unwrap();
    let opts = PanelOpts::default();
    let (frames, stats) = resolve_render_range(&tl, &opts, &ResolveThreading::default()).unwrap();
    assert!(frames.is_empty());
    assert_eq!(stats.frames_total, 0);
}

#[test]
fn invalid_panel_opts_are_rejected_before_resolving() {
    let tl = timeline();
    let opts = PanelOpts {
        terminal_line_interval_secs: 0.0,
        ..PanelOpts::default()
    };
    for parallel in [false, true] {
        let threading = ResolveThreading {
            parallel,
            ..ResolveThreading::default()
        };
        let err = resolve_render_range(&tl, &opts, &threading).unwrap_err();
        assert!(matches!(err, CodecastError::Validation(_)));
    }
}
