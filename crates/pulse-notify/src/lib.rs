//! # pulse-notify
//!
//! In-process notification center: an ordered list of short-lived
//! [`Notice`]s with monotonically increasing ids, optional auto-dismissal,
//! and a broadcast feed for renderers. Implements
//! [`NotificationSink`] so the real-time client can report events without
//! knowing anything about display.

#![deny(unsafe_code)]

mod center;

pub use center::{DEFAULT_DISMISS_AFTER, NotificationCenter};
