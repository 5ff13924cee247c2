use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived per tick from telemetry thresholds; `Critical` is also forced on
/// the controlled vehicle once SOS halts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleStatus {
    Optimal,
    Warning,
    Critical,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Telemetry {
    pub speed_kmh: f64,
    pub battery_temp_c: f64,
    pub vibration_hz: f64,
    pub brake_wear_pct: f64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub model: String,
    pub owner: String,
    pub status: VehicleStatus,
    pub telemetry: Telemetry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emotion {
    Focused,
    Distracted,
    Drowsy,
}

/// One biometric/attention frame. Produced either by the perception feed or
/// by the synthetic decay model; consumers only distinguish the source by
/// timestamp recency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverObservation {
    /// 0-100.
    pub attention: f64,
    /// 0.0 open, 1.0 closed.
    pub eye_closure: f64,
    /// Unitless magnitude; below ~0.3 counts as stillness.
    pub head_movement: f64,
    pub emotion: Emotion,
    pub heart_rate_bpm: f64,
}

impl DriverObservation {
    /// Resting state restored by the fatigue-test toggle.
    pub fn baseline() -> Self {
        Self {
            attention: 95.0,
            eye_closure: 0.0,
            head_movement: 1.5,
            emotion: Emotion::Focused,
            heart_rate_bpm: 75.0,
        }
    }
}

/// Process-wide escalation mode. Monotonic except for the single recovery
/// transition Emergency -> Normal; Sos is terminal for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscalationMode {
    Normal,
    Emergency,
    Sos,
}

impl EscalationMode {
    pub fn is_escalated(self) -> bool {
        !matches!(self, EscalationMode::Normal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentTag {
    Master,
    Diagnosis,
    Scheduling,
    Security,
    Safety,
    Rca,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Info,
    Action,
    Alert,
    Success,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    Blocked,
    Flagged,
    Allowed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityEvent {
    pub id: Uuid,
    /// Engine clock, milliseconds.
    pub at_ms: u64,
    pub recorded_at: DateTime<Utc>,
    pub severity: Severity,
    pub source: String,
    pub description: String,
    pub disposition: Disposition,
}
