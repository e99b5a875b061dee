//! Recording session wiring
//!
//! One `RecorderSession` per top-level page: the top-frame capture
//! feeds the reconciler directly, nested frames forward serialized
//! envelopes over the relay channel, and a pump task validates and
//! admits them. The session buffer is what the host harvests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use action_log::Reconciler;
use control_bridge::ControlBridge;
use frame_relay::{
    now_ms, ActionSink, DomEvent, EventCapture, FrameRelay, FrameScope, InstallRegistry,
    RelayMessage,
};
use session_store::{ActionBuffer, SessionStore};
use webscribe_core_types::{ActionRecord, FrameId, RecorderError, SessionId};

use crate::config::RecorderConfig;

/// Context key under which the top-level recorder registers itself.
const TOP_CONTEXT: &str = "top";
/// Capacity of the cross-frame relay channel.
const RELAY_CHANNEL_CAPACITY: usize = 256;

/// Top-level sink: captured records go straight into the reconciler.
struct ReconcilerSink {
    reconciler: Arc<Reconciler>,
}

#[async_trait]
impl ActionSink for ReconcilerSink {
    async fn accept(&self, record: ActionRecord) -> Result<(), RecorderError> {
        self.reconciler.admit(record);
        Ok(())
    }
}

pub struct RecorderSession {
    id: SessionId,
    started_at: i64,
    config: RecorderConfig,
    buffer: Arc<ActionBuffer>,
    reconciler: Arc<Reconciler>,
    bridge: Arc<ControlBridge>,
    registry: Arc<InstallRegistry>,
    capture: EventCapture,
    relay_tx: mpsc::Sender<String>,
    shutdown: CancellationToken,
}

impl RecorderSession {
    pub fn start(config: RecorderConfig, store: Arc<dyn SessionStore>) -> Arc<Self> {
        let id = SessionId::new();
        let started_at = now_ms();
        let buffer = Arc::new(ActionBuffer::open(store));
        let reconciler = Arc::new(Reconciler::new(config.reconciler.clone(), buffer.clone()));
        let bridge = Arc::new(ControlBridge::new(config.bridge.clone()));
        let registry = Arc::new(InstallRegistry::new());
        registry.install(&FrameId::named(TOP_CONTEXT));

        let sink = Arc::new(ReconcilerSink {
            reconciler: reconciler.clone(),
        });
        let capture = EventCapture::new(config.relay.clone(), FrameScope::TopLevel, sink);

        let (relay_tx, relay_rx) = mpsc::channel(RELAY_CHANNEL_CAPACITY);
        let shutdown = CancellationToken::new();
        tokio::spawn(pump(relay_rx, reconciler.clone(), shutdown.clone()));

        info!(session = %id, "recording session started");
        Arc::new(Self {
            id,
            started_at,
            config,
            buffer,
            reconciler,
            bridge,
            registry,
            capture,
            relay_tx,
            shutdown,
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Feed one top-level DOM event through capture and reconciliation.
    pub async fn dispatch(&self, event: DomEvent) {
        self.capture.handle(event).await;
    }

    /// Install a relay into a nested frame. Returns `None` when the
    /// frame is already wired (re-injection after in-frame navigation
    /// is a guaranteed no-op).
    pub fn attach_frame(&self, frame: FrameId) -> Option<FrameRelay> {
        FrameRelay::install(
            &self.registry,
            frame,
            self.config.relay.clone(),
            self.relay_tx.clone(),
        )
    }

    /// Host-facing read: the ordered action log.
    pub fn harvest(&self) -> Vec<ActionRecord> {
        self.buffer.read()
    }

    /// Host-facing reset: overwrite the persisted log with an empty
    /// array.
    pub fn reset(&self) {
        self.buffer.reset();
    }

    pub fn bridge(&self) -> &Arc<ControlBridge> {
        &self.bridge
    }

    /// Flush pending debounced input and stop the relay pump.
    pub async fn stop(&self) {
        self.capture.flush_pending().await;
        tokio::task::yield_now().await;
        self.shutdown.cancel();
        info!(
            session = %self.id,
            actions = self.buffer.len(),
            elapsed_ms = now_ms() - self.started_at,
            "recording session stopped"
        );
    }
}

async fn pump(
    mut rx: mpsc::Receiver<String>,
    reconciler: Arc<Reconciler>,
    shutdown: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                // Drain what the frames already sent before going away.
                while let Ok(raw) = rx.try_recv() {
                    admit_raw(&reconciler, &raw);
                }
                break;
            }
            maybe_raw = rx.recv() => {
                match maybe_raw {
                    Some(raw) => admit_raw(&reconciler, &raw),
                    None => break,
                }
            }
        }
    }
    debug!("relay pump stopped");
}

fn admit_raw(reconciler: &Reconciler, raw: &str) {
    match RelayMessage::decode(raw) {
        Ok(message) => {
            let mut action = message.into_action();
            // The boundary crossing is what marks a record as relayed.
            action.from_iframe = true;
            reconciler.admit(action);
        }
        Err(err) => {
            warn!(error = %err, "discarding invalid relay message");
        }
    }
}
