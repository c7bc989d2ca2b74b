//! # pulse-core
//!
//! Shared vocabulary for the InventoryPulse client crates:
//!
//! - **Envelope**: the `{type, payload}` wire unit carried on the event stream
//! - **Models**: REST DTOs matching the InventoryPulse API (products,
//!   categories, users, tokens, pagination)
//! - **Notices**: `Notice`/`NoticeKind` and the `NotificationSink` trait that
//!   decouples event handling from toast rendering

#![deny(unsafe_code)]

pub mod envelope;
pub mod models;
pub mod notify;

pub use envelope::Envelope;
pub use notify::{Notice, NoticeKind, NotificationSink};
