use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use webscribe_core_types::FrameId;

use crate::capture::{EventCapture, FrameScope};
use crate::model::DomEvent;
use crate::policy::RelayPolicyView;
use crate::registry::InstallRegistry;
use crate::transport::RelaySink;

/// The recorder instance living inside one nested frame: capture
/// listeners plus the boundary transport, no persistence of its own.
pub struct FrameRelay {
    frame: FrameId,
    capture: EventCapture,
}

impl FrameRelay {
    /// Install into a nested frame. Returns `None` when this frame
    /// already has a relay, making repeated injection a no-op.
    pub fn install(
        registry: &InstallRegistry,
        frame: FrameId,
        policy: RelayPolicyView,
        parent: mpsc::Sender<String>,
    ) -> Option<Self> {
        if !registry.install(&frame) {
            return None;
        }
        debug!(frame = %frame, "frame relay installed");
        let sink = Arc::new(RelaySink::new(parent));
        let capture = EventCapture::new(policy, FrameScope::Nested, sink);
        Some(Self { frame, capture })
    }

    pub fn frame(&self) -> &FrameId {
        &self.frame
    }

    pub async fn handle(&self, event: DomEvent) {
        self.capture.handle(event).await;
    }

    /// Drain pending debounced input before the frame goes away.
    pub async fn flush_pending(&self) {
        self.capture.flush_pending().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selector_synth::ElementSnapshot;
    use crate::transport::RelayMessage;

    #[tokio::test]
    async fn reinstall_into_same_frame_is_rejected() {
        let registry = InstallRegistry::new();
        let (tx, _rx) = mpsc::channel(4);
        let frame = FrameId::named("ad-frame");

        assert!(FrameRelay::install(
            &registry,
            frame.clone(),
            RelayPolicyView::default(),
            tx.clone()
        )
        .is_some());
        assert!(
            FrameRelay::install(&registry, frame, RelayPolicyView::default(), tx).is_none()
        );
    }

    #[tokio::test]
    async fn click_inside_frame_reaches_parent_tagged() {
        let registry = InstallRegistry::new();
        let (tx, mut rx) = mpsc::channel(4);
        let relay = FrameRelay::install(
            &registry,
            FrameId::named("checkout"),
            RelayPolicyView::default(),
            tx,
        )
        .expect("fresh install");

        relay
            .handle(DomEvent::Click {
                target: ElementSnapshot::new("button").with_id("pay").with_text("Pay"),
                timestamp: 3,
            })
            .await;

        let raw = rx.recv().await.unwrap();
        let action = RelayMessage::decode(&raw).unwrap().into_action();
        assert!(action.from_iframe);
        assert_eq!(action.selector, "iframe #pay");
        assert_eq!(action.xpath, "//iframe//*[@id=\"pay\"]");
    }
}
