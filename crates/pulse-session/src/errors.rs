//! Session persistence errors.

use thiserror::Error;

/// Failure while writing local state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
