//! The real-time wire unit.
//!
//! Every frame on the event stream is one complete JSON object with a
//! `type` discriminator and an opaque `payload`. There is no schema
//! version field and no batching; unknown types are delivered to
//! subscribers verbatim and produce no notice.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Event types
// ─────────────────────────────────────────────────────────────────────────────

/// A product was created.
pub const PRODUCT_CREATED: &str = "product.created";
/// A product was updated.
pub const PRODUCT_UPDATED: &str = "product.updated";
/// A product was deleted.
pub const PRODUCT_DELETED: &str = "product.deleted";
/// A product's stock quantity changed.
pub const STOCK_UPDATED: &str = "stock.updated";
/// A category was created.
pub const CATEGORY_CREATED: &str = "category.created";
/// A category was updated.
pub const CATEGORY_UPDATED: &str = "category.updated";
/// A category was deleted.
pub const CATEGORY_DELETED: &str = "category.deleted";

/// All event types the server currently emits.
pub const KNOWN_EVENT_TYPES: &[&str] = &[
    PRODUCT_CREATED,
    PRODUCT_UPDATED,
    PRODUCT_DELETED,
    STOCK_UPDATED,
    CATEGORY_CREATED,
    CATEGORY_UPDATED,
    CATEGORY_DELETED,
];

// ─────────────────────────────────────────────────────────────────────────────
// Envelope
// ─────────────────────────────────────────────────────────────────────────────

/// One decoded frame from the event stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Dispatch key for subscribers and the notice table.
    #[serde(rename = "type")]
    pub kind: String,
    /// Event body, kept opaque until a subscriber interprets it.
    pub payload: Value,
}

impl Envelope {
    /// Create an envelope from a type string and a payload.
    #[must_use]
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
