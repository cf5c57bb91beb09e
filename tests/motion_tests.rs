// Host-side tests for landmark velocity detection.

use beatpose_core::{exceeds_threshold, MotionSignalDetector, MOTION_THRESHOLD};

#[test]
fn first_sample_only_sets_baseline() {
    let mut d = MotionSignalDetector::new();
    assert_eq!(d.observe(0.5, 0.0), None);
    let prev = d.previous().unwrap();
    assert_eq!(prev.y, 0.5);
    assert_eq!(prev.t_ms, 0.0);
}

#[test]
fn scenario_downward_jump_is_minus_two_per_second() {
    let mut d = MotionSignalDetector::new();
    assert_eq!(d.observe(0.5, 0.0), None);
    let vy = d.observe(0.3, 100.0).unwrap();
    assert!((vy + 2.0).abs() < 1e-5, "vy={vy}");
    assert!(exceeds_threshold(vy, MOTION_THRESHOLD));
}

#[test]
fn every_sample_replaces_the_baseline() {
    let mut d = MotionSignalDetector::new();
    d.observe(0.5, 0.0);
    d.observe(0.3, 100.0);
    // relative to 0.3 @ 100, not 0.5 @ 0
    let vy = d.observe(0.4, 200.0).unwrap();
    assert!((vy - 1.0).abs() < 1e-5, "vy={vy}");
}

#[test]
fn slow_drift_stays_under_threshold() {
    let mut d = MotionSignalDetector::new();
    d.observe(0.50, 0.0);
    let vy = d.observe(0.51, 100.0).unwrap();
    assert!((vy - 0.1).abs() < 1e-4);
    assert!(!exceeds_threshold(vy, MOTION_THRESHOLD));
}

#[test]
fn threshold_is_strict_and_symmetric() {
    assert!(!exceeds_threshold(0.15, 0.15));
    assert!(exceeds_threshold(0.151, 0.15));
    assert!(exceeds_threshold(-0.151, 0.15));
    assert!(!exceeds_threshold(f32::NAN, 0.15));
}

#[test]
fn non_advancing_timestamp_emits_nothing_but_updates_baseline() {
    let mut d = MotionSignalDetector::new();
    d.observe(0.5, 100.0);
    assert_eq!(d.observe(0.2, 100.0), None);
    assert_eq!(d.observe(0.1, 50.0), None);
    assert_eq!(d.previous().unwrap().y, 0.1);
    let vy = d.observe(0.2, 150.0).unwrap();
    assert!((vy - 1.0).abs() < 1e-4, "vy={vy}");
}

#[test]
fn reset_forgets_baseline() {
    let mut d = MotionSignalDetector::new();
    d.observe(0.5, 0.0);
    d.reset();
    assert!(d.previous().is_none());
    assert_eq!(d.observe(0.9, 10.0), None);
}
