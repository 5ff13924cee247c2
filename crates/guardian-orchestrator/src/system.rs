use std::collections::VecDeque;

use chrono::Utc;
use driver_guards::{DriverMonitor, EscalationSignal, EscalationView};
use fleet_core::{
    AgentTag, ContactRegistry, DriverObservation, EmergencyContact, EscalationMode, LogBook,
    LogEntry, LogKind, SecurityEvent, Vehicle, VehicleStatus,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::GuardianConfig;
use crate::escalation::EscalationMachine;

/// Aggregated read-only view returned once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub vehicles: Vec<Vehicle>,
    pub logs: Vec<LogEntry>,
    pub security_events: Vec<SecurityEvent>,
    pub driver: DriverObservation,
    pub mode: EscalationMode,
    pub outbound_message: Option<String>,
}

/// The orchestrating core. Owns every piece of mutable state; collaborators
/// only read snapshots or push through the defined entry points. Single
/// logical thread of control, one `tick` per fixed interval.
pub struct GuardianSystem<C: Clock> {
    cfg: GuardianConfig,
    clock: C,
    rng: StdRng,
    vehicles: Vec<Vehicle>,
    book: LogBook,
    security_events: VecDeque<SecurityEvent>,
    monitor: DriverMonitor,
    machine: EscalationMachine,
    contacts: ContactRegistry,
    forced_fatigue: bool,
}

impl<C: Clock> GuardianSystem<C> {
    pub fn new(cfg: GuardianConfig, clock: C) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let vehicles = telemetry_sim::seed_fleet(cfg.fleet_size, Utc::now());

        let mut contacts = ContactRegistry::new();
        // Seed contact mirrors the shipped default profile.
        let _ = contacts.add("Sarah Chen", "Spouse", "+1 (555) 012-3456");

        Self {
            book: LogBook::new(cfg.log_cap),
            security_events: VecDeque::new(),
            monitor: DriverMonitor::new(cfg.monitor),
            machine: EscalationMachine::new(cfg.emergency_dwell_ms, cfg.braking_notice_delay_ms),
            contacts,
            vehicles,
            rng,
            clock,
            cfg,
            forced_fatigue: false,
        }
    }

    pub fn mode(&self) -> EscalationMode {
        self.machine.mode()
    }

    pub fn contacts(&self) -> &[EmergencyContact] {
        self.contacts.list()
    }

    fn view(&self) -> EscalationView {
        EscalationView {
            mode: self.machine.mode(),
        }
    }

    fn apply_signals(&mut self, signals: Vec<EscalationSignal>, now_ms: u64) {
        for signal in signals {
            self.machine
                .apply(signal, now_ms, &mut self.rng, &self.contacts, &mut self.book);
        }
    }

    /// Live perception push; may arrive at any time between ticks and takes
    /// priority over the synthetic path for the freshness window.
    pub fn observe(&mut self, input: DriverObservation) -> DriverObservation {
        let now_ms = self.clock.now_ms();
        let view = self.view();
        let observed = self.monitor.observe(input, now_ms, view);
        self.apply_signals(observed.signals, now_ms);
        observed.status
    }

    /// Advance every component one step and return the aggregated snapshot.
    pub fn tick(&mut self) -> Snapshot {
        let now_ms = self.clock.now_ms();
        let wall = Utc::now();

        // SOS fallback: emergency that outlived the dwell.
        if self.machine.dwell_expired(now_ms) {
            self.machine
                .trigger_sos(now_ms, &mut self.rng, &self.contacts, &mut self.book);
        }

        // Synthetic biometrics only when the live feed is stale.
        if self.monitor.live_stale(now_ms) {
            let view = self.view();
            let signals = self
                .monitor
                .synthetic_tick(&mut self.rng, self.forced_fatigue, view);
            self.apply_signals(signals, now_ms);
        }

        // Telemetry; the controlled vehicle follows the global mode.
        let mode = self.machine.mode();
        for vehicle in &mut self.vehicles {
            let control = if vehicle.id == telemetry_sim::CONTROLLED_VEHICLE_ID {
                match mode {
                    EscalationMode::Normal => telemetry_sim::ControlState::Free,
                    EscalationMode::Emergency => telemetry_sim::ControlState::Emergency,
                    EscalationMode::Sos => telemetry_sim::ControlState::Sos,
                }
            } else {
                telemetry_sim::ControlState::Free
            };
            telemetry_sim::advance_vehicle(vehicle, control, &mut self.rng, wall);
        }

        // Master scan for critical vehicles, NORMAL mode only.
        if self.machine.mode() == EscalationMode::Normal {
            scan_critical_vehicles(
                &self.vehicles,
                &mut self.book,
                now_ms,
                self.cfg.master_alert_suppress_ms,
            );
        }

        // Unauthorized-access roll.
        if let Some(event) = telemetry_sim::maybe_inject(&mut self.rng, now_ms, wall) {
            self.book.push(LogEntry::new(
                now_ms,
                AgentTag::Security,
                LogKind::Alert,
                format!("UEBA ALERT: {}. Action: BLOCKED", event.description),
            ));
            self.security_events.push_front(event);
            self.security_events.truncate(self.cfg.security_event_cap);
        }

        // Delayed notices surface here: log line, then outbound string.
        self.machine.drain_due(now_ms, &mut self.book);

        Snapshot {
            vehicles: self.vehicles.clone(),
            logs: self.book.to_vec(),
            security_events: self.security_events.iter().cloned().collect(),
            driver: self.monitor.status().clone(),
            mode: self.machine.mode(),
            outbound_message: self.machine.pop_outbound(),
        }
    }

    /// Flip the forced-fatigue test flag. Turning it off resets the whole
    /// escalation state and the driver baseline, whatever came before.
    pub fn toggle_fatigue_test(&mut self) -> bool {
        let now_ms = self.clock.now_ms();
        self.forced_fatigue = !self.forced_fatigue;
        if self.forced_fatigue {
            tracing::info!("fatigue simulation test enabled");
            self.book.push(LogEntry::new(
                now_ms,
                AgentTag::Safety,
                LogKind::Info,
                "Initiating fatigue simulation test sequence.",
            ));
        } else {
            tracing::info!("fatigue simulation test disabled, state reset");
            self.machine.reset();
            self.monitor.reset_baseline();
            self.book.push(LogEntry::new(
                now_ms,
                AgentTag::Master,
                LogKind::Info,
                "Driver control restored. Resuming standard monitoring.",
            ));
        }
        self.forced_fatigue
    }

    /// Invalid submissions are absorbed into a no-op, per the registry
    /// contract; only successful additions are logged.
    pub fn add_contact(&mut self, name: &str, relation: &str, phone: &str) -> bool {
        let now_ms = self.clock.now_ms();
        match self.contacts.add(name, relation, phone) {
            Ok(contact) => {
                self.book.push(LogEntry::new(
                    now_ms,
                    AgentTag::Safety,
                    LogKind::Info,
                    format!(
                        "Contact List Updated: Added {} ({}).",
                        contact.name, contact.relation
                    ),
                ));
                true
            }
            Err(err) => {
                tracing::debug!(%err, "contact submission rejected");
                false
            }
        }
    }

    pub fn remove_contact(&mut self, id: Uuid) {
        self.contacts.remove(id);
    }
}

/// One ALERT per critical vehicle, suppressed while a log already targeted
/// that vehicle within the window.
pub(crate) fn scan_critical_vehicles(
    vehicles: &[Vehicle],
    book: &mut LogBook,
    now_ms: u64,
    suppress_ms: u64,
) {
    let flagged: Vec<String> = vehicles
        .iter()
        .filter(|v| v.status == VehicleStatus::Critical)
        .filter(|v| !book.recent_for_vehicle(&v.id, now_ms, suppress_ms))
        .map(|v| v.id.clone())
        .collect();

    for id in flagged {
        book.push(
            LogEntry::new(
                now_ms,
                AgentTag::Master,
                LogKind::Alert,
                format!("Anomaly detected on {id}. Delegating to Diagnosis Agent."),
            )
            .for_vehicle(id.clone()),
        );
    }
}
