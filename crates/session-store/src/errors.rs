use thiserror::Error;

use webscribe_core_types::RecorderError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialization failed: {0}")]
    Serialize(String),
    #[error("storage backend failed: {0}")]
    Backend(String),
}

impl From<StoreError> for RecorderError {
    fn from(err: StoreError) -> Self {
        RecorderError::new(err.to_string())
    }
}
