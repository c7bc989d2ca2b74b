//! The notification center.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::debug;

use pulse_core::{Notice, NoticeKind, NotificationSink};

/// How long a notice stays up unless the caller says otherwise.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(4000);

/// Capacity of the broadcast feed. Slow renderers lag rather than block.
const FEED_CAPACITY: usize = 64;

/// Ordered collection of live notices with a broadcast feed.
///
/// Cheap to clone; all clones share the same state. Auto-dismissal runs on
/// the ambient tokio runtime; outside a runtime the notice simply stays
/// until removed.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

struct Inner {
    notices: Mutex<Vec<Notice>>,
    next_id: AtomicU64,
    feed: broadcast::Sender<Notice>,
}

impl NotificationCenter {
    /// Create an empty center.
    #[must_use]
    pub fn new() -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                notices: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                feed,
            }),
        }
    }

    /// Append a notice with the default dismissal delay; returns its id.
    pub fn push(&self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.push_with(kind, message, Some(DEFAULT_DISMISS_AFTER))
    }

    /// Append a notice; `dismiss_after = None` keeps it until removed.
    pub fn push_with(
        &self,
        kind: NoticeKind,
        message: impl Into<String>,
        dismiss_after: Option<Duration>,
    ) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let notice = Notice {
            id,
            kind,
            message: message.into(),
        };

        self.inner.notices.lock().push(notice.clone());
        let _ = self.inner.feed.send(notice);

        if let Some(delay) = dismiss_after {
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                let this = self.clone();
                let _ = handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    this.remove(id);
                });
            } else {
                debug!(id, "no runtime, notice will not auto-dismiss");
            }
        }

        id
    }

    /// Remove a notice by id. Unknown ids are a no-op.
    pub fn remove(&self, id: u64) {
        self.inner.notices.lock().retain(|n| n.id != id);
    }

    /// Snapshot of the current notices in insertion order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.inner.notices.lock().clone()
    }

    /// Subscribe to notices as they are appended.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.inner.feed.subscribe()
    }

    /// Report a failure.
    pub fn error(&self, message: &str) {
        let _ = self.push(NoticeKind::Error, message);
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for NotificationCenter {
    fn success(&self, message: &str) {
        let _ = self.push(NoticeKind::Success, message);
    }

    fn info(&self, message: &str) {
        let _ = self.push(NoticeKind::Info, message);
    }

    fn warning(&self, message: &str) {
        let _ = self.push(NoticeKind::Warning, message);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
