use fleet_core::{DriverObservation, Emotion, EscalationMode};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::monitor::{
    DriverMonitor, EmergencyReason, EscalationSignal, EscalationView, MonitorConfig,
};

fn view(mode: EscalationMode) -> EscalationView {
    EscalationView { mode }
}

fn frame(eye_closure: f64, head_movement: f64) -> DriverObservation {
    DriverObservation {
        attention: 90.0,
        eye_closure,
        head_movement,
        emotion: Emotion::Focused,
        heart_rate_bpm: 72.0,
    }
}

#[test]
fn debounce_triggers_on_frame_31_not_30() {
    let mut monitor = DriverMonitor::default();

    for i in 1..=30u64 {
        let out = monitor.observe(frame(0.7, 1.0), i * 100, view(EscalationMode::Normal));
        assert!(out.signals.is_empty(), "frame {i} escalated early");
    }
    assert_eq!(monitor.drowsy_frames(), 30);

    let out = monitor.observe(frame(0.7, 1.0), 3_100, view(EscalationMode::Normal));
    assert_eq!(
        out.signals,
        vec![EscalationSignal::EnterEmergency(
            EmergencyReason::DrowsinessDebounce
        )]
    );
    assert_eq!(out.status.emotion, Emotion::Drowsy);

    // Already escalated: idempotent, no second signal.
    let out = monitor.observe(frame(0.7, 1.0), 3_200, view(EscalationMode::Emergency));
    assert!(out.signals.is_empty());
}

#[test]
fn single_frame_drowsy_label_is_downgraded() {
    let mut monitor = DriverMonitor::default();
    let mut input = frame(0.7, 1.0);
    input.emotion = Emotion::Drowsy;

    let out = monitor.observe(input, 100, view(EscalationMode::Normal));
    assert_eq!(out.status.emotion, Emotion::Focused);
    assert!(out.signals.is_empty());
}

#[test]
fn open_eyes_reset_the_debounce_counter() {
    let mut monitor = DriverMonitor::default();
    for i in 1..=20u64 {
        monitor.observe(frame(0.7, 1.0), i * 100, view(EscalationMode::Normal));
    }
    assert_eq!(monitor.drowsy_frames(), 20);

    monitor.observe(frame(0.1, 1.0), 2_100, view(EscalationMode::Normal));
    assert_eq!(monitor.drowsy_frames(), 0);
}

#[test]
fn sustained_stillness_goes_straight_to_sos() {
    let mut monitor = DriverMonitor::default();

    let out = monitor.observe(frame(0.1, 0.05), 0, view(EscalationMode::Normal));
    assert!(out.signals.is_empty());

    // Within the timeout: still nothing.
    let out = monitor.observe(frame(0.1, 0.05), 6_900, view(EscalationMode::Normal));
    assert!(out.signals.is_empty());

    let out = monitor.observe(frame(0.1, 0.05), 7_100, view(EscalationMode::Normal));
    assert_eq!(
        out.signals,
        vec![
            EscalationSignal::EnterEmergency(EmergencyReason::StillnessTimeout),
            EscalationSignal::TriggerSos,
        ]
    );
    assert_eq!(out.status.emotion, Emotion::Drowsy);

    // SOS fired: a further 7 s of stillness never re-signals.
    let out = monitor.observe(frame(0.1, 0.05), 15_000, view(EscalationMode::Sos));
    assert!(out.signals.is_empty());
}

#[test]
fn movement_clears_the_stillness_clock() {
    let mut monitor = DriverMonitor::default();
    monitor.observe(frame(0.1, 0.05), 0, view(EscalationMode::Normal));
    monitor.observe(frame(0.1, 2.0), 4_000, view(EscalationMode::Normal));

    // Clock restarted: 7 s from the new onset, not the first.
    let out = monitor.observe(frame(0.1, 0.05), 5_000, view(EscalationMode::Normal));
    assert!(out.signals.is_empty());
    let out = monitor.observe(frame(0.1, 0.05), 11_000, view(EscalationMode::Normal));
    assert!(out.signals.is_empty());
    let out = monitor.observe(frame(0.1, 0.05), 12_100, view(EscalationMode::Normal));
    assert!(out
        .signals
        .contains(&EscalationSignal::TriggerSos));
}

#[test]
fn recovery_signal_only_from_emergency() {
    let mut monitor = DriverMonitor::default();

    let active = frame(0.1, 1.5);
    let out = monitor.observe(active.clone(), 100, view(EscalationMode::Emergency));
    assert_eq!(out.signals, vec![EscalationSignal::Recover]);
    assert_eq!(monitor.drowsy_frames(), 0);

    let out = monitor.observe(active.clone(), 200, view(EscalationMode::Normal));
    assert!(out.signals.is_empty());

    // SOS is sticky: an awake driver never signals recovery out of it.
    let out = monitor.observe(active, 300, view(EscalationMode::Sos));
    assert!(out.signals.is_empty());
}

#[test]
fn forced_fatigue_ramp_is_monotone_and_escalates() {
    let mut monitor = DriverMonitor::default();
    let mut rng = StdRng::seed_from_u64(11);

    // Tick 1: closure 0.3, mild attention drop, still focused.
    let signals = monitor.synthetic_tick(&mut rng, true, view(EscalationMode::Normal));
    assert!(signals.is_empty());
    assert!((monitor.status().eye_closure - 0.3).abs() < 1e-9);
    assert!((monitor.status().attention - 90.0).abs() < 1e-9);
    assert_eq!(monitor.status().emotion, Emotion::Focused);

    // Tick 2: closure 0.6, distracted.
    let signals = monitor.synthetic_tick(&mut rng, true, view(EscalationMode::Normal));
    assert!(signals.is_empty());
    assert!((monitor.status().eye_closure - 0.6).abs() < 1e-9);
    assert!((monitor.status().attention - 75.0).abs() < 1e-9);
    assert_eq!(monitor.status().emotion, Emotion::Distracted);

    // Tick 3: closure 0.9 >= 0.8, drowsy, emergency proposed.
    let signals = monitor.synthetic_tick(&mut rng, true, view(EscalationMode::Normal));
    assert_eq!(
        signals,
        vec![EscalationSignal::EnterEmergency(
            EmergencyReason::SyntheticDecay
        )]
    );
    assert_eq!(monitor.status().emotion, Emotion::Drowsy);
    assert!((monitor.status().head_movement - 0.1).abs() < 1e-9);
}

#[test]
fn baseline_drift_stays_in_band_and_never_signals() {
    let mut monitor = DriverMonitor::default();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..500 {
        let signals = monitor.synthetic_tick(&mut rng, false, view(EscalationMode::Normal));
        assert!(signals.is_empty());
        let s = monitor.status();
        assert!((85.0..=100.0).contains(&s.attention));
        assert!((0.0..=0.15).contains(&s.eye_closure));
        assert!((0.5..3.0).contains(&s.head_movement));
        assert!((65.0..=90.0).contains(&s.heart_rate_bpm));
        assert_eq!(s.emotion, Emotion::Focused);
    }
}

#[test]
fn live_window_gates_the_synthetic_path() {
    let mut monitor = DriverMonitor::default();
    assert!(monitor.live_stale(0));

    monitor.observe(frame(0.1, 1.0), 1_000, view(EscalationMode::Normal));
    assert!(!monitor.live_stale(2_500));
    assert!(monitor.live_stale(3_100));
}

#[test]
fn reset_baseline_clears_everything() {
    let mut monitor = DriverMonitor::new(MonitorConfig::default());
    for i in 1..=10u64 {
        monitor.observe(frame(0.7, 0.1), i * 100, view(EscalationMode::Normal));
    }
    monitor.reset_baseline();

    assert_eq!(monitor.drowsy_frames(), 0);
    assert!(monitor.live_stale(1_100));
    let s = monitor.status();
    assert!((s.attention - 95.0).abs() < 1e-9);
    assert_eq!(s.emotion, Emotion::Focused);
}
