use serde::{Deserialize, Serialize};

/// Tuning knobs for the dedup/merge state machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReconcilerPolicyView {
    /// Window within which a repeated identical input is discarded and a
    /// changed value on the same element is merged instead of appended.
    /// Balances "still the same logical edit" against "user came back
    /// later and retyped"; a product choice, not a DOM-derived constant.
    pub dedup_window_ms: i64,
}

impl Default for ReconcilerPolicyView {
    fn default() -> Self {
        Self {
            dedup_window_ms: 2000,
        }
    }
}
