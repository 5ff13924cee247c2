use driver_guards::MonitorConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardianConfig {
    /// Fixed seed for deterministic runs; `None` draws from entropy.
    pub seed: Option<u64>,
    pub fleet_size: usize,
    /// Audit log retention (newest-first).
    pub log_cap: usize,
    /// Security event retention; the reference behavior was unbounded.
    pub security_event_cap: usize,
    /// Wall-clock dwell in EMERGENCY before the SOS fallback fires.
    pub emergency_dwell_ms: u64,
    /// Delay before the braking notice and its outbound message surface.
    pub braking_notice_delay_ms: u64,
    /// Per-vehicle ALERT suppression window for the master scan.
    pub master_alert_suppress_ms: u64,
    pub monitor: MonitorConfig,
}

impl Default for GuardianConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fleet_size: 10,
            log_cap: 50,
            security_event_cap: 200,
            emergency_dwell_ms: 10_000,
            braking_notice_delay_ms: 500,
            master_alert_suppress_ms: 5_000,
            monitor: MonitorConfig::default(),
        }
    }
}
