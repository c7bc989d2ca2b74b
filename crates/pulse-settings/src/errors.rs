//! Settings errors.

use thiserror::Error;

/// Result alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Failure while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON (or does not match the schema).
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
