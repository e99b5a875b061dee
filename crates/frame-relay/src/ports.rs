use async_trait::async_trait;

use webscribe_core_types::{ActionRecord, RecorderError};

/// Destination for captured action records.
///
/// In the top-level context this is the reconciler; in a nested frame
/// it is the relay transport that forwards across the context boundary.
#[async_trait]
pub trait ActionSink: Send + Sync {
    async fn accept(&self, record: ActionRecord) -> Result<(), RecorderError>;
}
