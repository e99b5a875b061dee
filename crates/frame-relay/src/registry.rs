use dashmap::DashSet;

use tracing::debug;
use webscribe_core_types::FrameId;

/// Per-context installation registry.
///
/// Replaces ambient global marker flags: each browsing context is keyed
/// by identity, and repeated injection (navigation inside the same
/// frame, host re-driving the page) is a guaranteed no-op rather than a
/// duplicate-listener bug.
#[derive(Default)]
pub struct InstallRegistry {
    installed: DashSet<FrameId>,
}

impl InstallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when this call performed the installation, false
    /// when the context was already installed.
    pub fn install(&self, ctx: &FrameId) -> bool {
        let fresh = self.installed.insert(ctx.clone());
        if !fresh {
            debug!(frame = %ctx, "recorder already installed, skipping");
        }
        fresh
    }

    pub fn is_installed(&self, ctx: &FrameId) -> bool {
        self.installed.contains(ctx)
    }
}
