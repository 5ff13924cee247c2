use chrono::{DateTime, Utc};
use fleet_core::{Telemetry, Vehicle, VehicleStatus};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The single fleet member subject to emergency-mode overrides.
pub const CONTROLLED_VEHICLE_ID: &str = "EV-100";

const OWNERS: [&str; 10] = [
    "Alice Chen",
    "Bob Smith",
    "Charlie Kim",
    "Diana Prince",
    "Evan Wright",
    "Fiona Gallagher",
    "George Miller",
    "Hannah Lee",
    "Ian Stark",
    "Julia Roberts",
];

const MODELS: [&str; 10] = [
    "Model X-Pro",
    "CyberSedan",
    "EcoHatch",
    "Model X-Pro",
    "CyberSedan",
    "EcoHatch",
    "Model X-Pro",
    "CyberSedan",
    "EcoHatch",
    "HyperTruck",
];

const MOVING_PROBABILITY: f64 = 0.8;
const CHAOS_PROBABILITY: f64 = 0.05;
const BRAKE_WEAR_PER_TICK: f64 = 0.001;

/// How the global escalation mode bears on one vehicle this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlState {
    /// Independent simulation; all non-controlled vehicles, always.
    Free,
    /// Controlled vehicle during pre-SOS emergency: gentle deceleration.
    Emergency,
    /// Controlled vehicle under SOS: forced halt.
    Sos,
}

pub fn seed_fleet(size: usize, now: DateTime<Utc>) -> Vec<Vehicle> {
    (0..size)
        .map(|i| Vehicle {
            id: format!("EV-{}", 100 + i),
            model: MODELS[i % MODELS.len()].to_string(),
            owner: OWNERS[i % OWNERS.len()].to_string(),
            status: VehicleStatus::Optimal,
            telemetry: Telemetry {
                speed_kmh: 0.0,
                battery_temp_c: 25.0,
                vibration_hz: 2.0,
                brake_wear_pct: 10.0,
                recorded_at: now,
            },
        })
        .collect()
}

/// Mutate one vehicle's telemetry for this tick and re-derive its status.
pub fn advance_vehicle(
    vehicle: &mut Vehicle,
    control: ControlState,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) {
    let mut speed = vehicle.telemetry.speed_kmh;
    let mut temp = vehicle.telemetry.battery_temp_c;

    let vibration = match control {
        ControlState::Sos => {
            speed = (speed * 0.5 - 10.0).max(0.0);
            if speed < 2.0 {
                // Halted: snap to zero, no vibration, pack cools.
                speed = 0.0;
                temp = (temp - 0.5).max(25.0);
                0.0
            } else {
                temp += 0.2;
                rng.gen_range(20.0..50.0)
            }
        }
        ControlState::Emergency => {
            speed = (speed * 0.9 - 2.0).max(0.0);
            rng.gen_range(10.0..20.0)
        }
        ControlState::Free => {
            let moving = rng.gen_bool(MOVING_PROBABILITY);
            speed = if moving { rng.gen_range(40.0..120.0) } else { 0.0 };

            let chaos = rng.gen_bool(CHAOS_PROBABILITY);
            temp += rng.gen_range(-0.5..0.5);
            if moving {
                temp += 0.1;
            }
            if chaos {
                temp = rng.gen_range(50.0..90.0);
            }
            temp = temp.clamp(20.0, 100.0);

            let vibration = if moving { rng.gen_range(10.0..30.0) } else { 2.0 };
            if chaos && rng.gen_bool(0.5) {
                rng.gen_range(60.0..95.0)
            } else {
                vibration
            }
        }
    };

    let mut brake_wear = vehicle.telemetry.brake_wear_pct;
    if speed > 0.0 {
        brake_wear += BRAKE_WEAR_PER_TICK;
    }

    vehicle.status = if control == ControlState::Sos {
        // Halted/immobilized, not a sensor fault.
        VehicleStatus::Critical
    } else {
        derive_status(brake_wear, temp, vibration)
    };

    vehicle.telemetry = Telemetry {
        speed_kmh: round1(speed),
        battery_temp_c: round1(temp),
        vibration_hz: round1(vibration),
        brake_wear_pct: brake_wear,
        recorded_at: now,
    };
}

pub fn derive_status(brake_wear: f64, battery_temp: f64, vibration: f64) -> VehicleStatus {
    if brake_wear > 90.0 {
        VehicleStatus::Maintenance
    } else if battery_temp > 60.0 || vibration > 50.0 {
        VehicleStatus::Critical
    } else if battery_temp > 45.0 || vibration > 40.0 {
        VehicleStatus::Warning
    } else {
        VehicleStatus::Optimal
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
