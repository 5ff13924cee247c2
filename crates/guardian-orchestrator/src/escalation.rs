use std::collections::VecDeque;

use driver_guards::EscalationSignal;
use fleet_core::{AgentTag, ContactRegistry, EscalationMode, LogBook, LogEntry, LogKind};
use rand::Rng;

const FACILITIES: [&str; 4] = [
    "Tesla Service Center (3.2km)",
    "City General Hospital ER (5.1km)",
    "State Police Station #9 (1.8km)",
    "EV Guardian Outpost (0.5km)",
];

/// One-shot delayed side effect. Drained by the tick loop once due; the log
/// entry is always appended before the outbound string is enqueued.
#[derive(Debug, Clone)]
struct DelayedNotice {
    due_ms: u64,
    agent: AgentTag,
    log_message: String,
    outbound: String,
}

/// Owns the NORMAL -> EMERGENCY -> SOS progression, the emergency entry
/// timestamp, the delayed-notice queue and the outbound notification FIFO.
#[derive(Debug)]
pub struct EscalationMachine {
    mode: EscalationMode,
    emergency_since_ms: Option<u64>,
    pending: Vec<DelayedNotice>,
    outbound: VecDeque<String>,
    dwell_ms: u64,
    notice_delay_ms: u64,
}

impl EscalationMachine {
    pub fn new(dwell_ms: u64, notice_delay_ms: u64) -> Self {
        Self {
            mode: EscalationMode::Normal,
            emergency_since_ms: None,
            pending: Vec::new(),
            outbound: VecDeque::new(),
            dwell_ms,
            notice_delay_ms,
        }
    }

    pub fn mode(&self) -> EscalationMode {
        self.mode
    }

    pub fn apply(
        &mut self,
        signal: EscalationSignal,
        now_ms: u64,
        rng: &mut impl Rng,
        contacts: &ContactRegistry,
        book: &mut LogBook,
    ) {
        match signal {
            EscalationSignal::EnterEmergency(reason) => {
                if self.enter_emergency(now_ms, book) {
                    tracing::warn!(?reason, "entered emergency mode");
                }
            }
            EscalationSignal::TriggerSos => {
                // The guard-driven path means sustained inactivity; the dwell
                // fallback reaches SOS without this line.
                if self.mode != EscalationMode::Sos {
                    book.push(LogEntry::new(
                        now_ms,
                        AgentTag::Safety,
                        LogKind::Critical,
                        "GUARDIAN AGENT: Complete driver inactivity detected (>7s). Assuming incapacitation.",
                    ));
                }
                self.trigger_sos(now_ms, rng, contacts, book);
            }
            EscalationSignal::Recover => {
                self.recover(now_ms, book);
            }
        }
    }

    /// Idempotent: a no-op while already escalated.
    pub fn enter_emergency(&mut self, now_ms: u64, book: &mut LogBook) -> bool {
        if self.mode.is_escalated() {
            return false;
        }
        self.mode = EscalationMode::Emergency;
        self.emergency_since_ms = Some(now_ms);
        book.push(LogEntry::new(
            now_ms,
            AgentTag::Safety,
            LogKind::Critical,
            "Biometric thresholds breached. Driver unresponsive.",
        ));
        self.pending.push(DelayedNotice {
            due_ms: now_ms + self.notice_delay_ms,
            agent: AgentTag::Master,
            log_message: "TAKING CONTROL. Initiating emergency braking protocol. Rerouting to safe stop."
                .to_string(),
            outbound:
                "CRITICAL ALERT: Driver fatigue/inactivity detected. Autonomous pullover sequence activated."
                    .to_string(),
        });
        true
    }

    /// Sticky: fires at most once per session. Escalates through EMERGENCY
    /// first if called from NORMAL.
    pub fn trigger_sos(
        &mut self,
        now_ms: u64,
        rng: &mut impl Rng,
        contacts: &ContactRegistry,
        book: &mut LogBook,
    ) -> bool {
        if self.mode == EscalationMode::Sos {
            return false;
        }
        self.enter_emergency(now_ms, book);
        self.mode = EscalationMode::Sos;

        let facility = FACILITIES[rng.gen_range(0..FACILITIES.len())];
        tracing::warn!(facility, "SOS protocol engaged");
        book.push(LogEntry::new(
            now_ms,
            AgentTag::Safety,
            LogKind::Critical,
            format!("SOS PROTOCOL: Prolonged inactivity detected. Auto-contacting {facility}."),
        ));

        let names = if contacts.is_empty() {
            "(None configured)".to_string()
        } else {
            contacts.joined_names()
        };
        book.push(LogEntry::new(
            now_ms,
            AgentTag::Safety,
            LogKind::Action,
            format!("SOS EXTENSION: Notifying contacts: {names}"),
        ));
        self.outbound
            .push_back(format!("Contacting emergency contacts: {names}"));
        self.outbound.push_back(format!(
            "SOS ACTIVATED: Vehicle halted. Emergency teams dispatched to {facility}."
        ));
        true
    }

    /// Recovery guard target: EMERGENCY only. SOS never recovers here.
    pub fn recover(&mut self, now_ms: u64, book: &mut LogBook) -> bool {
        if self.mode != EscalationMode::Emergency {
            return false;
        }
        self.mode = EscalationMode::Normal;
        self.emergency_since_ms = None;
        tracing::info!("driver active again, emergency cleared");
        book.push(LogEntry::new(
            now_ms,
            AgentTag::Safety,
            LogKind::Success,
            "Driver active. Emergency protocol deactivated.",
        ));
        true
    }

    /// Fallback path: EMERGENCY that outlives the dwell goes to SOS even
    /// without a stillness trigger.
    pub fn dwell_expired(&self, now_ms: u64) -> bool {
        self.mode == EscalationMode::Emergency
            && self
                .emergency_since_ms
                .is_some_and(|since| now_ms.saturating_sub(since) > self.dwell_ms)
    }

    /// Surface every due delayed notice: log first, then outbound string.
    pub fn drain_due(&mut self, now_ms: u64, book: &mut LogBook) {
        let pending = std::mem::take(&mut self.pending);
        for notice in pending {
            if notice.due_ms <= now_ms {
                book.push(LogEntry::new(
                    now_ms,
                    notice.agent,
                    LogKind::Critical,
                    notice.log_message,
                ));
                self.outbound.push_back(notice.outbound);
            } else {
                self.pending.push(notice);
            }
        }
    }

    pub fn pop_outbound(&mut self) -> Option<String> {
        self.outbound.pop_front()
    }

    pub fn outbound_len(&self) -> usize {
        self.outbound.len()
    }

    /// Full reset for the fatigue-test toggle: mode, entry timestamp and
    /// pending notices. Already-enqueued outbound text is left to drain.
    pub fn reset(&mut self) {
        self.mode = EscalationMode::Normal;
        self.emergency_since_ms = None;
        self.pending.clear();
    }
}
