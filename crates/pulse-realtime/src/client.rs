//! Public surface of the event client.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use pulse_core::{Envelope, NotificationSink};

use crate::actor::{self, Command};
use crate::config::RealtimeConfig;
use crate::registry::SubscriptionId;
use crate::transport::{Transport, TungsteniteTransport};

/// Read-only snapshot of the connection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionState {
    /// True iff the most recent lifecycle event was a successful open.
    pub connected: bool,
    /// The last successfully decoded frame, if any.
    pub last_message: Option<Envelope>,
}

/// Typed real-time event client.
///
/// Create one per application session, `connect()` it on session start and
/// `disconnect()` it on teardown or logout; it may be reconnected any
/// number of times. All methods are fire-and-forget posts into the
/// client's actor: none of them blocks, and none of them fails to the
/// caller.
///
/// Must be created inside a tokio runtime.
pub struct EventClient {
    cmd_tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<ConnectionState>,
    next_subscription: AtomicU64,
    _actor: JoinHandle<()>,
}

impl EventClient {
    /// Client over the production WebSocket transport.
    #[must_use]
    pub fn new(config: RealtimeConfig, sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_transport(config, Arc::new(TungsteniteTransport), sink)
    }

    /// Client over a caller-supplied transport.
    #[must_use]
    pub fn with_transport(
        config: RealtimeConfig,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ConnectionState::default());
        let handle = tokio::spawn(actor::run(config, transport, sink, cmd_rx, state_tx));
        Self {
            cmd_tx,
            state_rx,
            next_subscription: AtomicU64::new(1),
            _actor: handle,
        }
    }

    /// Open the connection.
    ///
    /// No-op while a connection is open or opening. A connection that
    /// cannot be constructed at all is logged and dropped without a retry;
    /// a failed handshake counts as a close and feeds the automatic
    /// reconnection policy.
    pub fn connect(&self) {
        let _ = self.cmd_tx.send(Command::Connect);
    }

    /// Close the connection and cancel any pending automatic retry.
    ///
    /// Safe to call when already disconnected. Does not reset the
    /// reconnect counter; only a successful open does.
    pub fn disconnect(&self) {
        let _ = self.cmd_tx.send(Command::Disconnect);
    }

    /// Register `handler` for `event_type`.
    ///
    /// Handlers run on the client's actor in registration order with the
    /// event payload as argument; the same closure may be registered more
    /// than once and each registration is invoked independently. A
    /// panicking handler is logged and does not stop dispatch to the
    /// others.
    pub fn on<F>(&self, event_type: impl Into<String>, handler: F) -> Subscription
    where
        F: FnMut(Value) + Send + 'static,
    {
        let event_type = event_type.into();
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        let _ = self.cmd_tx.send(Command::Subscribe {
            event_type: event_type.clone(),
            id,
            handler: Box::new(handler),
        });
        Subscription {
            event_type,
            id,
            cmd_tx: self.cmd_tx.clone(),
        }
    }

    /// Remove a registration by id, for callers that did not keep the
    /// [`Subscription`]. Unknown ids are a no-op.
    pub fn off(&self, event_type: &str, id: SubscriptionId) {
        let _ = self.cmd_tx.send(Command::Unsubscribe {
            event_type: event_type.to_string(),
            id,
        });
    }

    /// Reactive view of the `{connected, last_message}` snapshot.
    #[must_use]
    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.state_rx.clone()
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ConnectionState {
        self.state_rx.borrow().clone()
    }
}

/// Undo handle returned by [`EventClient::on`].
pub struct Subscription {
    event_type: String,
    id: SubscriptionId,
    cmd_tx: mpsc::UnboundedSender<Command>,
}

impl Subscription {
    /// Registration id, usable with [`EventClient::off`].
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// The event type this registration listens to.
    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Remove the registration.
    ///
    /// Consumes the handle, so it cannot run twice. Dropping the handle
    /// without calling this keeps the handler registered.
    pub fn unsubscribe(self) {
        let _ = self.cmd_tx.send(Command::Unsubscribe {
            event_type: self.event_type,
            id: self.id,
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
