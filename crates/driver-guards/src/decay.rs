use fleet_core::{DriverObservation, Emotion};
use rand::Rng;

/// One step of the forced-fatigue ramp: eye closure climbs toward fully
/// closed, attention drops faster the further the eyes are shut, heart rate
/// sinks, and the head goes still.
pub fn forced_fatigue_step(current: &DriverObservation) -> DriverObservation {
    let eye_closure = (current.eye_closure + 0.3).min(1.0);

    let drop = if eye_closure > 0.6 {
        35.0
    } else if eye_closure > 0.3 {
        15.0
    } else {
        5.0
    };
    let attention = (current.attention - drop).max(0.0);
    let heart_rate_bpm = (current.heart_rate_bpm - 1.5).max(50.0);

    let emotion = if attention < 40.0 || eye_closure >= 0.8 {
        Emotion::Drowsy
    } else if attention < 75.0 || eye_closure > 0.4 {
        Emotion::Distracted
    } else {
        Emotion::Focused
    };

    DriverObservation {
        attention,
        eye_closure,
        head_movement: 0.1,
        emotion,
        heart_rate_bpm,
    }
}

/// Gentle drift around nominal baselines; never escalates.
pub fn baseline_drift(current: &DriverObservation, rng: &mut impl Rng) -> DriverObservation {
    DriverObservation {
        attention: (current.attention + rng.gen_range(-2.0..2.0)).clamp(85.0, 100.0),
        eye_closure: (current.eye_closure + rng.gen_range(-0.05..0.05)).clamp(0.0, 0.15),
        head_movement: rng.gen_range(0.5..3.0),
        emotion: Emotion::Focused,
        heart_rate_bpm: (current.heart_rate_bpm + rng.gen_range(-1.0..1.0)).clamp(65.0, 90.0),
    }
}
