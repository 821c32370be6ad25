use super::*;
use crate::script::model::ActionKind;

fn fps30() -> Fps {
    Fps::new(30).unwrap()
}

fn action(secs: f64) -> CodeAction {
    CodeAction::new("src/main.rs", ActionKind::Create, "fn main() {}", secs)
}

#[test]
fn two_actions_place_back_to_back() {
    let tl = Timeline::build(&[action(8.0), action(10.0)], fps30()).unwrap();
    let iv = tl.intervals();
    assert_eq!(iv.len(), 2);
    assert_eq!((iv[0].start_secs, iv[0].end_secs), (0.0, 8.0));
    assert_eq!((iv[1].start_secs, iv[1].end_secs), (8.0, 18.0));
    assert_eq!(iv[0].frames(), FrameRange::new(FrameIndex(0), FrameIndex(240)).unwrap());
    assert_eq!(iv[1].start_frame, FrameIndex(240));
    assert_eq!(iv[1].end_frame, FrameIndex(540));
    assert_eq!(tl.total_duration_secs(), 18.0);
}

#[test]
fn intervals_are_contiguous_and_conserve_duration() {
    let durations = [0.7, 1.3, 2.25, 0.1, 5.0, 0.333];
    let actions: Vec<_> = durations.iter().map(|&d| action(d)).collect();
    let tl = Timeline::build(&actions, fps30()).unwrap();

    assert_eq!(tl.intervals()[0].start_secs, 0.0);
    for pair in tl.intervals().windows(2) {
        assert_eq!(pair[1].start_secs, pair[0].end_secs);
        assert!(pair[0].start_frame <= pair[1].start_frame);
    }

    let mut sum = 0.0;
    for d in durations {
        sum += d;
    }
    assert_eq!(tl.total_duration_secs(), sum);
    assert_eq!(tl.intervals().last().unwrap().end_secs, sum);
}

#[test]
fn empty_action_list_builds_empty_timeline() {
    let tl = Timeline::build(&[], fps30()).unwrap();
    assert!(tl.is_empty());
    assert_eq!(tl.total_duration_secs(), 0.0);
    assert!(tl.interval_at_secs(0.0).is_none());
}

#[test]
fn non_positive_durations_fail_fast() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = Timeline::build(&[action(1.0), action(bad)], fps30()).unwrap_err();
        assert!(matches!(err, CodecastError::Validation(_)));
        assert!(err.to_string().contains("action 1"));
    }
}

#[test]
fn overflowing_total_fails_fast() {
    // Each duration is finite; their sum is not.
    let err = Timeline::build(&[action(1e308), action(1e308)], fps30()).unwrap_err();
    assert!(matches!(err, CodecastError::Validation(_)));
    assert!(err.to_string().contains("action 1"));

    // Finite seconds whose frame index does not fit in u64.
    let err = Timeline::build(&[action(1.0), action(1e18)], fps30()).unwrap_err();
    assert!(matches!(err, CodecastError::Validation(_)));
    assert!(err.to_string().contains("action 1"));

    // Long but representable timelines still build.
    let tl = Timeline::build(&[action(1e9)], fps30()).unwrap();
    assert_eq!(tl.intervals()[0].end_frame, FrameIndex(30_000_000_000));
}

#[test]
fn building_twice_is_structurally_equal() {
    let actions = [action(1.5), action(2.5)];
    let a = Timeline::build(&actions, fps30()).unwrap();
    let b = Timeline::build(&actions, fps30()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn interval_lookup_is_half_open() {
    let tl = Timeline::build(&[action(8.0), action(10.0)], fps30()).unwrap();
    assert_eq!(tl.interval_at_secs(0.0).map(|(i, _)| i), Some(0));
    assert_eq!(tl.interval_at_secs(7.999).map(|(i, _)| i), Some(0));
    assert_eq!(tl.interval_at_secs(8.0).map(|(i, _)| i), Some(1));
    assert_eq!(tl.interval_at_secs(17.99).map(|(i, _)| i), Some(1));
    assert!(tl.interval_at_secs(18.0).is_none());
    assert!(tl.interval_at_secs(-0.5).is_none());
    assert!(tl.interval_at_secs(f64::NAN).is_none());
}

#[test]
fn reveal_tables_are_built_per_action() {
    let tl = Timeline::build(&[action(1.0)], fps30()).unwrap();
    assert_eq!(tl.intervals()[0].reveal().len(), "fn main() {}".len());
}

#[test]
fn serializes_without_reveal_tables() {
    let tl = Timeline::build(&[action(2.0)], fps30()).unwrap();
    let v = serde_json::to_value(&tl).unwrap();
    assert_eq!(v["fps"], 30);
    assert_eq!(v["intervals"][0]["end_frame"], 60);
    assert!(v["intervals"][0].get("reveal").is_none());
}
