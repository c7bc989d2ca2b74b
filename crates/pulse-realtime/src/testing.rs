//! Test doubles: a scripted transport and a recording notification sink.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use pulse_core::{NoticeKind, NotificationSink};

use crate::transport::{Link, Transport, TransportError};

/// What the next `connect` call should do.
pub(crate) enum ConnectOutcome {
    /// Open succeeds; the test controls the link through its handle.
    Accept,
    /// Handshake failure (drives the reconnection policy).
    Refuse,
    /// Construction failure (must not be retried).
    Invalid,
}

enum FakeFrame {
    Text(String),
    Error(String),
    Close,
}

/// Scripted transport.
///
/// Each `connect` call pops the next scripted outcome (defaulting to
/// `Accept` when the script is empty) and records a handle per accepted
/// link so the test can push frames or close the connection from the
/// server side.
pub(crate) struct FakeTransport {
    outcomes: Mutex<VecDeque<ConnectOutcome>>,
    links: Mutex<Vec<FakeLinkHandle>>,
    attempts: AtomicUsize,
}

impl FakeTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(VecDeque::new()),
            links: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
        })
    }

    pub(crate) fn script(&self, outcomes: impl IntoIterator<Item = ConnectOutcome>) {
        self.outcomes.lock().extend(outcomes);
    }

    /// Total `connect` calls so far.
    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Handle for the `index`-th accepted link.
    pub(crate) fn link(&self, index: usize) -> FakeLinkHandle {
        self.links.lock()[index].clone()
    }

    /// Spin until at least `n` connect calls happened.
    pub(crate) async fn wait_for_attempts(&self, n: usize) {
        while self.attempts() < n {
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn connect(&self, _endpoint: &str) -> Result<Box<dyn Link>, TransportError> {
        let _ = self.attempts.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .outcomes
            .lock()
            .pop_front()
            .unwrap_or(ConnectOutcome::Accept);
        match outcome {
            ConnectOutcome::Accept => {
                let (frame_tx, frame_rx) = mpsc::unbounded_channel();
                let closed = Arc::new(AtomicBool::new(false));
                self.links.lock().push(FakeLinkHandle {
                    frame_tx,
                    closed: closed.clone(),
                });
                Ok(Box::new(FakeLink { frame_rx, closed }))
            }
            ConnectOutcome::Refuse => Err(TransportError::Connect("connection refused".into())),
            ConnectOutcome::Invalid => Err(TransportError::InvalidEndpoint("bad url".into())),
        }
    }
}

/// Server-side handle to an accepted fake link.
#[derive(Clone)]
pub(crate) struct FakeLinkHandle {
    frame_tx: mpsc::UnboundedSender<FakeFrame>,
    closed: Arc<AtomicBool>,
}

impl FakeLinkHandle {
    pub(crate) fn send_text(&self, text: &str) {
        let _ = self.frame_tx.send(FakeFrame::Text(text.to_string()));
    }

    pub(crate) fn send_error(&self, message: &str) {
        let _ = self.frame_tx.send(FakeFrame::Error(message.to_string()));
    }

    /// Close the connection from the server side.
    pub(crate) fn close(&self) {
        let _ = self.frame_tx.send(FakeFrame::Close);
    }

    /// Whether the client closed this link deliberately.
    pub(crate) fn client_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

struct FakeLink {
    frame_rx: mpsc::UnboundedReceiver<FakeFrame>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl Link for FakeLink {
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>> {
        match self.frame_rx.recv().await {
            Some(FakeFrame::Text(text)) => Some(Ok(text)),
            Some(FakeFrame::Error(message)) => Some(Err(TransportError::Stream(message))),
            Some(FakeFrame::Close) | None => None,
        }
    }

    async fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
        self.frame_rx.close();
    }
}

/// Sink that records every call for assertion.
#[derive(Default)]
pub(crate) struct RecordingSink {
    calls: Mutex<Vec<(NoticeKind, String)>>,
}

impl RecordingSink {
    pub(crate) fn calls(&self) -> Vec<(NoticeKind, String)> {
        self.calls.lock().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn success(&self, message: &str) {
        self.calls.lock().push((NoticeKind::Success, message.to_string()));
    }

    fn info(&self, message: &str) {
        self.calls.lock().push((NoticeKind::Info, message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.calls.lock().push((NoticeKind::Warning, message.to_string()));
    }
}
