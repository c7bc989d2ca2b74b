//! # pulse-realtime
//!
//! Resilient real-time event client for InventoryPulse.
//!
//! One long-lived WebSocket connection delivers server-pushed domain events
//! (`product.*`, `stock.updated`, `category.*`) to typed subscribers. The
//! client survives transient network failures through bounded automatic
//! reconnection (fixed delay, capped attempt count) and exposes a
//! publish/subscribe surface that is decoupled from connection lifecycle.
//!
//! All mutable state lives inside a single actor task; `connect`,
//! `disconnect`, `on` and `off` post commands into that task, and the
//! connection's read loop posts lifecycle events into the same channel
//! domain, so no two transitions ever run concurrently. Consumers observe
//! the `{connected, last_message}` snapshot through a `tokio::sync::watch`
//! receiver.

#![deny(unsafe_code)]

mod actor;
mod client;
mod config;
mod notices;
mod registry;
mod transport;

#[cfg(test)]
mod testing;

pub use client::{ConnectionState, EventClient, Subscription};
pub use config::{
    DEFAULT_ENDPOINT, DEFAULT_MAX_RECONNECT_ATTEMPTS, DEFAULT_RECONNECT_DELAY, RealtimeConfig,
};
pub use registry::{EventHandler, SubscriptionId};
pub use transport::{Link, Transport, TransportError, TungsteniteTransport};
