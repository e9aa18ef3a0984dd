//! Score persistence error types.

use thiserror::Error;

/// Score history errors
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Backing store I/O failed
    #[error("Score store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// History could not be serialized
    #[error("Failed to serialize score history: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Storage key is not usable by the store
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Result type for score operations
pub type ScoreResult<T> = Result<T, ScoreError>;
