//! Trace replay
//!
//! Drives a recording session from a JSON list of DOM events, standing
//! in for the live page when exercising the pipeline from the CLI and
//! in tests. Each step may name a nested frame and an optional delay
//! before dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use frame_relay::{DomEvent, FrameRelay};
use webscribe_core_types::FrameId;

use crate::session::RecorderSession;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TraceStep {
    /// Nested frame to dispatch into; top-level when absent.
    #[serde(default)]
    pub frame: Option<String>,
    /// Delay before dispatching this step.
    #[serde(default)]
    pub wait_ms: Option<u64>,
    #[serde(flatten)]
    pub event: Option<DomEvent>,
}

pub struct TraceRunner {
    session: Arc<RecorderSession>,
    relays: HashMap<String, FrameRelay>,
}

impl TraceRunner {
    pub fn new(session: Arc<RecorderSession>) -> Self {
        Self {
            session,
            relays: HashMap::new(),
        }
    }

    pub async fn run(&mut self, steps: Vec<TraceStep>) {
        for step in steps {
            if let Some(ms) = step.wait_ms {
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }
            let Some(event) = step.event else {
                continue;
            };
            match step.frame {
                None => self.session.dispatch(event).await,
                Some(name) => self.dispatch_to_frame(name, event).await,
            }
        }
    }

    /// Let outstanding debounce timers fire, then flush the frames and
    /// the session so the harvested log is complete.
    pub async fn settle(&self, debounce_ms: u64) {
        tokio::time::sleep(Duration::from_millis(debounce_ms + 50)).await;
        for relay in self.relays.values() {
            relay.flush_pending().await;
        }
        self.session.stop().await;
        tokio::task::yield_now().await;
    }

    async fn dispatch_to_frame(&mut self, name: String, event: DomEvent) {
        if !self.relays.contains_key(&name) {
            match self.session.attach_frame(FrameId::named(name.clone())) {
                Some(relay) => {
                    self.relays.insert(name.clone(), relay);
                }
                None => {
                    warn!(frame = %name, "frame already attached elsewhere, dropping event");
                    return;
                }
            }
        }
        if let Some(relay) = self.relays.get(&name) {
            relay.handle(event).await;
        }
    }
}
