use serde::{Deserialize, Serialize};

use selector_synth::ElementSnapshot;

/// Epoch milliseconds at capture time.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Raw DOM event as seen by the capturing-phase listeners.
///
/// Timestamps are supplied by the embedder at dispatch time so replayed
/// traces and tests stay deterministic.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DomEvent {
    Click {
        target: ElementSnapshot,
        timestamp: i64,
    },
    Input {
        target: ElementSnapshot,
        timestamp: i64,
    },
    Blur {
        target: ElementSnapshot,
        timestamp: i64,
    },
    /// Legacy mutation notification used by rich-text editors that
    /// bypass `input`. Carries the ancestor chain of the mutated text
    /// node, nearest first.
    CharacterData {
        ancestors: Vec<ElementSnapshot>,
        timestamp: i64,
    },
    /// `change` event; only meaningful on `<select>`.
    Change {
        target: ElementSnapshot,
        timestamp: i64,
    },
}

impl DomEvent {
    pub fn timestamp(&self) -> i64 {
        match self {
            DomEvent::Click { timestamp, .. }
            | DomEvent::Input { timestamp, .. }
            | DomEvent::Blur { timestamp, .. }
            | DomEvent::CharacterData { timestamp, .. }
            | DomEvent::Change { timestamp, .. } => *timestamp,
        }
    }
}
