//! Transport seam — thin trait over `tokio-tungstenite`.
//!
//! The client only needs three things from a transport: open a connection,
//! read text frames, close. Keeping that behind a trait lets tests drive
//! the state machine with a scripted fake instead of a live server.

use async_trait::async_trait;
use futures::StreamExt;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// Transport failure classification.
///
/// [`TransportError::InvalidEndpoint`] means the connection could not even
/// be constructed (a caller/configuration bug) and must not be retried.
/// The other variants behave like a closed connection and feed the
/// reconnection policy.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint URL is not something a connection can be built from.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// The handshake failed (server unreachable, refused, protocol error).
    #[error("connect failed: {0}")]
    Connect(String),
    /// The established stream reported an error.
    #[error("stream error: {0}")]
    Stream(String),
}

/// An established connection delivering text frames.
#[async_trait]
pub trait Link: Send {
    /// Next inbound text frame. `None` once the connection has closed.
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>>;

    /// Close the connection.
    async fn close(&mut self);
}

/// Opens [`Link`]s to an endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a connection to `endpoint`.
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn Link>, TransportError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// tokio-tungstenite implementation
// ─────────────────────────────────────────────────────────────────────────────

/// The production transport: one WebSocket per [`Link`].
pub struct TungsteniteTransport;

struct WsLink {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl Transport for TungsteniteTransport {
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn Link>, TransportError> {
        // URL problems are construction failures, not connection failures.
        let request = endpoint
            .into_client_request()
            .map_err(|e| TransportError::InvalidEndpoint(e.to_string()))?;

        let (stream, _) = connect_async(request)
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        Ok(Box::new(WsLink { stream }))
    }
}

#[async_trait]
impl Link for WsLink {
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => return Some(Ok(text.to_string())),
                Some(Ok(Message::Close(_))) | None => return None,
                // Pings, pongs and binary frames are not event frames.
                Some(Ok(_)) => {}
                Some(Err(error)) => return Some(Err(TransportError::Stream(error.to_string()))),
            }
        }
    }

    async fn close(&mut self) {
        let _ = self.stream.close(None).await;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
