use thiserror::Error;

use webscribe_core_types::RecorderError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("envelope encode failed: {0}")]
    Encode(String),
    #[error("envelope decode failed: {0}")]
    Decode(String),
}

impl From<RelayError> for RecorderError {
    fn from(err: RelayError) -> Self {
        RecorderError::new(err.to_string())
    }
}
