pub mod clock;
pub mod config;
pub mod escalation;
pub mod system;


pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GuardianConfig;
pub use escalation::EscalationMachine;
pub use system::{GuardianSystem, Snapshot};
