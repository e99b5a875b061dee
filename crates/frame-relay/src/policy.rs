use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelayPolicyView {
    /// Quiet interval after the last keystroke before the pending input
    /// record is emitted. Bounds message volume under fast typing while
    /// preserving the final value.
    pub debounce_ms: u64,
    /// Visible-text snippet length captured on clicks.
    pub text_snippet_max: usize,
}

impl Default for RelayPolicyView {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            text_snippet_max: 50,
        }
    }
}
