use chrono::{DateTime, Utc};
use fleet_core::{Disposition, SecurityEvent, Severity};
use rand::Rng;
use uuid::Uuid;

/// Per-tick injection probability; converges to ~2% of ticks.
pub const ANOMALY_PROBABILITY: f64 = 0.02;
const HIGH_SEVERITY_PROBABILITY: f64 = 0.3;

pub const ANOMALY_SOURCE: &str = "Scheduling Agent";
pub const ANOMALY_DESCRIPTION: &str = "Attempted access to /raw_telemetry/encryption_keys";

/// Stateless unauthorized-access roll. The orchestrator pairs a hit with the
/// matching ALERT log entry.
pub fn maybe_inject(rng: &mut impl Rng, now_ms: u64, now: DateTime<Utc>) -> Option<SecurityEvent> {
    if !rng.gen_bool(ANOMALY_PROBABILITY) {
        return None;
    }
    let severity = if rng.gen_bool(HIGH_SEVERITY_PROBABILITY) {
        Severity::High
    } else {
        Severity::Medium
    };
    Some(SecurityEvent {
        id: Uuid::new_v4(),
        at_ms: now_ms,
        recorded_at: now,
        severity,
        source: ANOMALY_SOURCE.to_string(),
        description: ANOMALY_DESCRIPTION.to_string(),
        disposition: Disposition::Blocked,
    })
}
