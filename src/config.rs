//! Recorder configuration
//!
//! Aggregates the per-crate policy views into one document the host
//! can load from a JSON file; every knob has the production default.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use action_log::ReconcilerPolicyView;
use control_bridge::BridgePolicyView;
use frame_relay::RelayPolicyView;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    pub relay: RelayPolicyView,
    pub reconciler: ReconcilerPolicyView,
    pub bridge: BridgePolicyView,
}

impl RecorderConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_recording_constants() {
        let config = RecorderConfig::default();
        assert_eq!(config.relay.debounce_ms, 500);
        assert_eq!(config.reconciler.dedup_window_ms, 2000);
        assert_eq!(config.bridge.click_guard_ms, 100);
        assert_eq!(config.bridge.drag_threshold_px, 5.0);
    }

    #[test]
    fn partial_document_fills_in_defaults() {
        let config: RecorderConfig =
            serde_json::from_str(r#"{"relay": {"debounce_ms": 250, "text_snippet_max": 50}}"#)
                .unwrap();
        assert_eq!(config.relay.debounce_ms, 250);
        assert_eq!(config.reconciler.dedup_window_ms, 2000);
    }
}
