pub mod decay;
pub mod monitor;

#[cfg(test)]
mod tests;

pub use monitor::{
    DriverMonitor, EmergencyReason, EscalationSignal, EscalationView, MonitorConfig, Observed,
};
