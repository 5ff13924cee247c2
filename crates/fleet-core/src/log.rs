use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{AgentTag, LogKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    /// Engine clock, milliseconds; drives the flood-suppression window.
    pub at_ms: u64,
    pub recorded_at: DateTime<Utc>,
    pub agent: AgentTag,
    pub kind: LogKind,
    pub message: String,
    pub vehicle: Option<String>,
}

impl LogEntry {
    pub fn new(at_ms: u64, agent: AgentTag, kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            at_ms,
            recorded_at: Utc::now(),
            agent,
            kind,
            message: message.into(),
            vehicle: None,
        }
    }

    pub fn for_vehicle(mut self, vehicle_id: impl Into<String>) -> Self {
        self.vehicle = Some(vehicle_id.into());
        self
    }
}

/// Bounded, newest-first audit sink shared by every agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogBook {
    entries: VecDeque<LogEntry>,
    cap: usize,
}

impl LogBook {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.cap);
    }

    /// True if any entry targeted `vehicle_id` within the last `window_ms`.
    pub fn recent_for_vehicle(&self, vehicle_id: &str, now_ms: u64, window_ms: u64) -> bool {
        self.entries.iter().any(|e| {
            e.vehicle.as_deref() == Some(vehicle_id)
                && e.at_ms + window_ms > now_ms
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for LogBook {
    fn default() -> Self {
        Self::new(50)
    }
}
