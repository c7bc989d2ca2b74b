//! Reconnection policy and endpoint configuration.

use std::time::Duration;

/// Default event stream endpoint.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080/ws";

/// Fixed delay before an automatic reconnect attempt.
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(3000);

/// Automatic reconnect attempts before giving up.
pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// Configuration for an [`EventClient`](crate::EventClient).
///
/// The reconnection policy is deliberately simple: a fixed delay and a
/// bounded attempt count. The fields exist so tests can shorten the delay;
/// they are not per-call knobs.
#[derive(Clone, Debug)]
pub struct RealtimeConfig {
    /// WebSocket URL of the event stream.
    pub endpoint: String,
    /// Delay between a close and the next automatic attempt.
    pub reconnect_delay: Duration,
    /// Automatic attempts before the client waits for a manual `connect`.
    pub max_reconnect_attempts: u32,
}

impl RealtimeConfig {
    /// Config for the given endpoint with the default policy.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            max_reconnect_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
        }
    }
}
