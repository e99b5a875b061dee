use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BridgePolicyView {
    /// Pointer movement beyond this many pixels marks the gesture as a
    /// drag rather than a click.
    pub drag_threshold_px: f64,
    /// How long after mouse-up a press is still treated as the tail of
    /// the drag and suppressed.
    pub click_guard_ms: i64,
}

impl Default for BridgePolicyView {
    fn default() -> Self {
        Self {
            drag_threshold_px: 5.0,
            click_guard_ms: 100,
        }
    }
}
