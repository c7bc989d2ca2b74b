//! The event client actor.
//!
//! Every piece of mutable state — connection phase, reconnect counter,
//! subscriber registry, the `{connected, last_message}` snapshot — is owned
//! by one task running [`run`]. Client handles post [`Command`]s, the
//! connection read loops post [`LinkEvent`]s, and the retry timer posts
//! into the same channel domain, so no two transitions ever interleave.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use pulse_core::{Envelope, NotificationSink};

use crate::client::ConnectionState;
use crate::config::RealtimeConfig;
use crate::notices;
use crate::registry::{EventHandler, SubscriberRegistry, SubscriptionId};
use crate::transport::{Link, Transport, TransportError};

/// Commands posted by [`EventClient`](crate::EventClient) handles.
pub(crate) enum Command {
    Connect,
    Disconnect,
    Subscribe {
        event_type: String,
        id: SubscriptionId,
        handler: EventHandler,
    },
    Unsubscribe {
        event_type: String,
        id: SubscriptionId,
    },
}

/// Events posted into the actor by connection tasks and the retry timer.
///
/// Each live connection gets a fresh generation number; events carrying a
/// generation the actor no longer tracks come from a replaced or
/// deliberately closed connection and are dropped.
enum LinkEvent {
    Opened { generation: u64 },
    Frame { generation: u64, text: String },
    Failed { generation: u64, error: TransportError },
    Closed { generation: u64 },
    RetryElapsed,
}

/// Connection lifecycle phase.
enum Phase {
    /// No connection and nothing scheduled.
    Idle,
    /// An open is in flight.
    Connecting {
        generation: u64,
        cancel: CancellationToken,
    },
    /// The connection is up.
    Connected {
        generation: u64,
        cancel: CancellationToken,
    },
    /// A retry timer is pending.
    Reconnecting,
    /// The attempt budget is spent; only a manual connect leaves this.
    Exhausted,
}

impl Phase {
    fn live_generation(&self) -> Option<u64> {
        match self {
            Self::Connecting { generation, .. } | Self::Connected { generation, .. } => {
                Some(*generation)
            }
            Self::Idle | Self::Reconnecting | Self::Exhausted => None,
        }
    }
}

/// Run the actor until every client handle is dropped.
pub(crate) async fn run(
    config: RealtimeConfig,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn NotificationSink>,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    state_tx: watch::Sender<ConnectionState>,
) {
    let (link_tx, mut link_rx) = mpsc::unbounded_channel();
    let mut actor = Actor {
        config,
        transport,
        sink,
        state_tx,
        link_tx,
        registry: SubscriberRegistry::default(),
        attempts: 0,
        generation: 0,
        phase: Phase::Idle,
        retry: None,
    };

    loop {
        tokio::select! {
            // Commands first: an unsubscribe sent before a frame arrived
            // must win when both are ready.
            biased;
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => actor.handle_command(cmd),
                None => break,
            },
            event = link_rx.recv() => {
                // The actor keeps its own sender, so this never yields None.
                if let Some(event) = event {
                    actor.handle_link_event(event);
                }
            }
        }
    }

    actor.shutdown();
}

struct Actor {
    config: RealtimeConfig,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn NotificationSink>,
    state_tx: watch::Sender<ConnectionState>,
    link_tx: mpsc::UnboundedSender<LinkEvent>,
    registry: SubscriberRegistry,
    /// Failed/closed connections since the last successful open.
    attempts: u32,
    /// Last issued connection generation.
    generation: u64,
    phase: Phase,
    /// Pending retry timer, if any.
    retry: Option<JoinHandle<()>>,
}

impl Actor {
    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Connect => self.handle_connect(),
            Command::Disconnect => self.handle_disconnect(),
            Command::Subscribe {
                event_type,
                id,
                handler,
            } => self.registry.subscribe(event_type, id, handler),
            Command::Unsubscribe { event_type, id } => {
                self.registry.unsubscribe(&event_type, id);
            }
        }
    }

    /// Open a new connection unless one is already open or opening.
    fn handle_connect(&mut self) {
        if matches!(self.phase, Phase::Connecting { .. } | Phase::Connected { .. }) {
            debug!("connect ignored, connection already open");
            return;
        }
        self.start_attempt();
    }

    /// Close the live connection (if any), cancel a pending retry, and go
    /// idle. The reconnect counter is deliberately left alone: only a
    /// successful open resets it.
    fn handle_disconnect(&mut self) {
        if let Some(timer) = self.retry.take() {
            timer.abort();
        }
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        if let Phase::Connecting { cancel, .. } | Phase::Connected { cancel, .. } = phase {
            cancel.cancel();
        }
        self.set_connected(false);
    }

    fn start_attempt(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let cancel = CancellationToken::new();
        self.phase = Phase::Connecting {
            generation,
            cancel: cancel.clone(),
        };
        debug!(generation, endpoint = %self.config.endpoint, "opening event stream");

        let transport = self.transport.clone();
        let endpoint = self.config.endpoint.clone();
        let link_tx = self.link_tx.clone();
        let _ = tokio::spawn(run_link(transport, endpoint, generation, cancel, link_tx));
    }

    fn handle_link_event(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::Opened { generation } => self.handle_opened(generation),
            LinkEvent::Frame { generation, text } => {
                if self.phase.live_generation() == Some(generation) {
                    self.handle_frame(&text);
                }
            }
            LinkEvent::Failed { generation, error } => self.handle_failed(generation, &error),
            LinkEvent::Closed { generation } => {
                if self.phase.live_generation() == Some(generation) {
                    info!("event stream disconnected");
                    self.handle_closed();
                } else {
                    debug!(generation, "ignoring close from replaced connection");
                }
            }
            LinkEvent::RetryElapsed => {
                self.retry = None;
                // Re-checks the already-open guard, so a manual connect in
                // the meantime makes this a no-op.
                self.handle_connect();
            }
        }
    }

    fn handle_opened(&mut self, generation: u64) {
        if self.phase.live_generation() != Some(generation) {
            debug!(generation, "ignoring open from replaced connection");
            return;
        }
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        self.phase = match phase {
            Phase::Connecting { generation, cancel } => Phase::Connected { generation, cancel },
            other => other,
        };
        self.attempts = 0;
        self.set_connected(true);
        info!("event stream connected");
        self.sink.info("Real-time updates enabled");
    }

    fn handle_failed(&mut self, generation: u64, error: &TransportError) {
        if self.phase.live_generation() != Some(generation) {
            debug!(generation, "ignoring failure from replaced connection");
            return;
        }
        match error {
            // The connection could not even be constructed: caller error,
            // logged and dropped without a retry.
            TransportError::InvalidEndpoint(_) => {
                error!(%error, "failed to open event stream");
                self.phase = Phase::Idle;
                self.set_connected(false);
            }
            // A failed handshake behaves like a close and feeds the
            // reconnection policy.
            TransportError::Connect(_) | TransportError::Stream(_) => {
                warn!(%error, "event stream connection failed");
                self.handle_closed();
            }
        }
    }

    /// Shared close path: flip `connected`, then either schedule a retry or
    /// give up once the budget is spent.
    fn handle_closed(&mut self) {
        self.set_connected(false);
        if self.attempts < self.config.max_reconnect_attempts {
            self.attempts += 1;
            info!(
                attempt = self.attempts,
                max = self.config.max_reconnect_attempts,
                delay = ?self.config.reconnect_delay,
                "scheduling reconnect"
            );
            self.phase = Phase::Reconnecting;
            self.schedule_retry();
        } else {
            warn!(
                attempts = self.attempts,
                "reconnect attempts exhausted, waiting for manual connect"
            );
            self.phase = Phase::Exhausted;
        }
    }

    fn schedule_retry(&mut self) {
        // At most one pending timer.
        if let Some(previous) = self.retry.take() {
            previous.abort();
        }
        let delay = self.config.reconnect_delay;
        let link_tx = self.link_tx.clone();
        self.retry = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = link_tx.send(LinkEvent::RetryElapsed);
        }));
    }

    /// One inbound text frame: decode, publish, dispatch, announce.
    fn handle_frame(&mut self, text: &str) {
        let envelope: Envelope = match serde_json::from_str(text) {
            Ok(envelope) => envelope,
            Err(error) => {
                warn!(%error, "discarding malformed event frame");
                return;
            }
        };
        self.state_tx
            .send_modify(|state| state.last_message = Some(envelope.clone()));
        self.registry.dispatch(&envelope.kind, &envelope.payload);
        notices::announce(self.sink.as_ref(), &envelope);
    }

    fn set_connected(&self, connected: bool) {
        self.state_tx.send_modify(|state| state.connected = connected);
    }

    fn shutdown(&mut self) {
        if let Some(timer) = self.retry.take() {
            timer.abort();
        }
        if let Phase::Connecting { cancel, .. } | Phase::Connected { cancel, .. } = &self.phase {
            cancel.cancel();
        }
        debug!("event client actor stopped");
    }
}

/// Per-connection task: open the link, then pump frames into the actor
/// until the connection dies or the actor cancels it.
async fn run_link(
    transport: Arc<dyn Transport>,
    endpoint: String,
    generation: u64,
    cancel: CancellationToken,
    link_tx: mpsc::UnboundedSender<LinkEvent>,
) {
    let mut link: Box<dyn Link> = match transport.connect(&endpoint).await {
        Ok(link) => link,
        Err(error) => {
            let _ = link_tx.send(LinkEvent::Failed { generation, error });
            return;
        }
    };
    let _ = link_tx.send(LinkEvent::Opened { generation });

    loop {
        tokio::select! {
            frame = link.next_frame() => match frame {
                Some(Ok(text)) => {
                    let _ = link_tx.send(LinkEvent::Frame { generation, text });
                }
                // A transport error alone is logged; the close that
                // follows drives the state transition.
                Some(Err(error)) => warn!(%error, "event stream error"),
                None => break,
            },
            () = cancel.cancelled() => {
                link.close().await;
                break;
            }
        }
    }

    let _ = link_tx.send(LinkEvent::Closed { generation });
}
