//! User-facing notice vocabulary.
//!
//! Components that discover something worth telling the user about hand a
//! message to a [`NotificationSink`]; how (and how long) the message is
//! shown is the renderer's business.

use serde::{Deserialize, Serialize};

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Something completed successfully.
    Success,
    /// Something failed.
    Error,
    /// Neutral information.
    Info,
    /// Something the user should look at.
    Warning,
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A short-lived user-facing message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    /// Process-local monotonically increasing id.
    pub id: u64,
    /// Severity.
    pub kind: NoticeKind,
    /// Display text.
    pub message: String,
}

/// Sink for user-facing notices emitted by background components.
///
/// Calls are fire-and-forget: implementations must not block and must not
/// fail. The event client only decides *that* a message of a given kind
/// occurred; rendering and dismissal belong to the implementation.
pub trait NotificationSink: Send + Sync {
    /// Report a success.
    fn success(&self, message: &str);
    /// Report neutral information.
    fn info(&self, message: &str);
    /// Report a warning.
    fn warning(&self, message: &str);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
