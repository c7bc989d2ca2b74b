//! API client errors.

use thiserror::Error;

/// Failure of an API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response (network, TLS, or
    /// body decode failure).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the credentials; the local session has been
    /// cleared.
    #[error("session expired, sign in again")]
    SessionExpired,

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Best available description from the error body.
        message: String,
    },

    /// The local session store could not be updated.
    #[error("session store: {0}")]
    Session(#[from] pulse_session::SessionError),
}
