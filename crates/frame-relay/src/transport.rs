use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

use webscribe_core_types::{ActionRecord, RecorderError};

use crate::errors::RelayError;
use crate::ports::ActionSink;

/// Messages crossing the frame boundary. The discriminator doubles as
/// the serde tag, so decoding rejects unknown kinds before the payload
/// is ever trusted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RelayMessage {
    #[serde(rename = "__webscribe_iframe_action__")]
    Action { action: ActionRecord },
}

impl RelayMessage {
    pub fn action(action: ActionRecord) -> Self {
        Self::Action { action }
    }

    /// Serialize for the boundary crossing; the contexts share no heap,
    /// only this string.
    pub fn encode(&self) -> Result<String, RelayError> {
        serde_json::to_string(self).map_err(|err| RelayError::Encode(err.to_string()))
    }

    /// Parse and validate a raw boundary message. Anything without the
    /// expected discriminator fails here and never reaches the log.
    pub fn decode(raw: &str) -> Result<Self, RelayError> {
        serde_json::from_str(raw).map_err(|err| RelayError::Decode(err.to_string()))
    }

    pub fn into_action(self) -> ActionRecord {
        match self {
            RelayMessage::Action { action } => action,
        }
    }
}

/// Sink used inside nested frames: tags the record as frame-crossing,
/// serializes it and sends it to the parent context.
///
/// Transport failures (serialization, closed parent) are logged and the
/// record is silently dropped; a relay failure must never surface as an
/// uncaught error in the page.
pub struct RelaySink {
    tx: mpsc::Sender<String>,
}

impl RelaySink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ActionSink for RelaySink {
    async fn accept(&self, mut record: ActionRecord) -> Result<(), RecorderError> {
        record.from_iframe = true;
        let raw = match RelayMessage::action(record).encode() {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "iframe action dropped");
                return Ok(());
            }
        };
        if self.tx.send(raw).await.is_err() {
            warn!("parent context closed, iframe action dropped");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click() -> ActionRecord {
        ActionRecord::click(7, "iframe #go", "//iframe//*[@id=\"go\"]", "Go", "button")
    }

    #[test]
    fn wire_format_matches_the_page_protocol() {
        let message = RelayMessage::action(click());
        let value: serde_json::Value = serde_json::from_str(&message.encode().unwrap()).unwrap();
        assert_eq!(value["type"], "__webscribe_iframe_action__");
        assert_eq!(value["action"]["selector"], "iframe #go");
        assert_eq!(value["action"]["tagName"], "button");
    }

    #[test]
    fn unknown_discriminator_is_rejected() {
        let raw = r#"{"type":"__evil__","action":{}}"#;
        assert!(RelayMessage::decode(raw).is_err());
    }

    #[test]
    fn malformed_payload_is_rejected() {
        assert!(RelayMessage::decode("not json").is_err());
        assert!(RelayMessage::decode(r#"{"type":"__webscribe_iframe_action__"}"#).is_err());
    }

    #[tokio::test]
    async fn sink_tags_and_forwards() {
        let (tx, mut rx) = mpsc::channel(4);
        let sink = RelaySink::new(tx);
        sink.accept(click()).await.unwrap();

        let raw = rx.recv().await.unwrap();
        let action = RelayMessage::decode(&raw).unwrap().into_action();
        assert!(action.from_iframe);
        assert_eq!(action.selector, "iframe #go");
    }

    #[tokio::test]
    async fn closed_parent_is_swallowed() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sink = RelaySink::new(tx);
        assert!(sink.accept(click()).await.is_ok());
    }
}
