pub mod anomaly;
pub mod fleet;


pub use anomaly::maybe_inject;
pub use fleet::{advance_vehicle, seed_fleet, ControlState, CONTROLLED_VEHICLE_ID};
