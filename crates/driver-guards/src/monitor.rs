use fleet_core::{DriverObservation, Emotion, EscalationMode};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::decay;

/// Thresholds for the debounce and stillness guards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Eye closure above this counts as a closed-eye frame.
    pub eye_closure_threshold: f64,
    /// Consecutive closed-eye frames tolerated before escalation (~3 s).
    pub drowsy_frame_threshold: u32,
    /// Head movement below this counts as stillness.
    pub stillness_threshold: f64,
    /// Sustained stillness beyond this triggers SOS directly.
    pub stillness_timeout_ms: u64,
    /// A live perception push within this window suppresses the synthetic path.
    pub live_window_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            eye_closure_threshold: 0.6,
            drowsy_frame_threshold: 30,
            stillness_threshold: 0.3,
            stillness_timeout_ms: 7_000,
            live_window_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyReason {
    DrowsinessDebounce,
    StillnessTimeout,
    SyntheticDecay,
}

/// Proposal emitted by the monitor; the orchestrator decides whether and how
/// to apply it against the escalation machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationSignal {
    EnterEmergency(EmergencyReason),
    TriggerSos,
    Recover,
}

/// Read-only view of the escalation machine the guards condition on.
#[derive(Debug, Clone, Copy)]
pub struct EscalationView {
    pub mode: EscalationMode,
}

impl EscalationView {
    pub fn sos_fired(self) -> bool {
        self.mode == EscalationMode::Sos
    }
}

#[derive(Debug, Clone)]
pub struct Observed {
    pub status: DriverObservation,
    pub signals: Vec<EscalationSignal>,
}

/// Classifies biometric frames and tracks the debounce counter and stillness
/// clock. Live pushes and the synthetic path share the same state; the only
/// distinction is the last-live timestamp.
#[derive(Debug, Clone)]
pub struct DriverMonitor {
    cfg: MonitorConfig,
    status: DriverObservation,
    drowsy_frames: u32,
    stillness_since_ms: Option<u64>,
    last_live_ms: Option<u64>,
}

impl DriverMonitor {
    pub fn new(cfg: MonitorConfig) -> Self {
        Self {
            cfg,
            status: DriverObservation::baseline(),
            drowsy_frames: 0,
            stillness_since_ms: None,
            last_live_ms: None,
        }
    }

    pub fn status(&self) -> &DriverObservation {
        &self.status
    }

    pub fn drowsy_frames(&self) -> u32 {
        self.drowsy_frames
    }

    /// True when no live push arrived within the freshness window; the
    /// orchestrator then runs the synthetic path instead.
    pub fn live_stale(&self, now_ms: u64) -> bool {
        match self.last_live_ms {
            Some(t) => now_ms.saturating_sub(t) > self.cfg.live_window_ms,
            None => true,
        }
    }

    /// Process one live perception frame.
    pub fn observe(
        &mut self,
        input: DriverObservation,
        now_ms: u64,
        view: EscalationView,
    ) -> Observed {
        self.last_live_ms = Some(now_ms);
        let mut signals = Vec::new();

        let eyes_closed = input.eye_closure > self.cfg.eye_closure_threshold;
        if eyes_closed {
            self.drowsy_frames += 1;
        } else {
            self.drowsy_frames = 0;
        }

        let mut emotion = input.emotion;

        // A raw DROWSY label below the debounce threshold is treated as a
        // blink, not fatigue.
        if emotion == Emotion::Drowsy && self.drowsy_frames <= self.cfg.drowsy_frame_threshold {
            emotion = Emotion::Focused;
        }

        if self.drowsy_frames > self.cfg.drowsy_frame_threshold && !view.mode.is_escalated() {
            emotion = Emotion::Drowsy;
            tracing::debug!(frames = self.drowsy_frames, "drowsiness debounce crossed");
            signals.push(EscalationSignal::EnterEmergency(
                EmergencyReason::DrowsinessDebounce,
            ));
        }

        if input.head_movement < self.cfg.stillness_threshold {
            match self.stillness_since_ms {
                None => self.stillness_since_ms = Some(now_ms),
                Some(start) => {
                    let elapsed = now_ms.saturating_sub(start);
                    if elapsed > self.cfg.stillness_timeout_ms && !view.sos_fired() {
                        emotion = Emotion::Drowsy;
                        tracing::debug!(elapsed_ms = elapsed, "stillness timeout crossed");
                        if !view.mode.is_escalated() {
                            signals.push(EscalationSignal::EnterEmergency(
                                EmergencyReason::StillnessTimeout,
                            ));
                        }
                        signals.push(EscalationSignal::TriggerSos);
                    }
                }
            }
        } else {
            self.stillness_since_ms = None;
        }

        // Recovery guard. SOS is sticky; only a plain emergency clears.
        if !eyes_closed
            && input.head_movement > self.cfg.stillness_threshold
            && view.mode == EscalationMode::Emergency
        {
            self.drowsy_frames = 0;
            signals.push(EscalationSignal::Recover);
        }

        self.status = DriverObservation { emotion, ..input };
        Observed {
            status: self.status.clone(),
            signals,
        }
    }

    /// Advance the synthetic model one tick. Runs only when `live_stale`.
    /// The debounce and stillness guards do not apply on this path; a
    /// forced-fatigue ramp escalates on its own thresholds and SOS arrives
    /// via the emergency dwell fallback.
    pub fn synthetic_tick(
        &mut self,
        rng: &mut impl Rng,
        forced_fatigue: bool,
        view: EscalationView,
    ) -> Vec<EscalationSignal> {
        let mut signals = Vec::new();
        if forced_fatigue {
            let next = decay::forced_fatigue_step(&self.status);
            if next.emotion == Emotion::Drowsy && !view.mode.is_escalated() {
                signals.push(EscalationSignal::EnterEmergency(
                    EmergencyReason::SyntheticDecay,
                ));
            }
            self.status = next;
        } else {
            self.status = decay::baseline_drift(&self.status, rng);
        }
        signals
    }

    /// Restore the documented baseline and clear every counter and timer.
    pub fn reset_baseline(&mut self) {
        self.status = DriverObservation::baseline();
        self.drowsy_frames = 0;
        self.stillness_since_ms = None;
        self.last_live_ms = None;
    }
}

impl Default for DriverMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}
