//! Event → user-facing notice mapping.
//!
//! A fixed table, not an extension point: a new server-pushed type that
//! should produce a notice needs an entry here. Types without an entry are
//! still dispatched to subscribers, they just stay silent.

use serde_json::Value;

use pulse_core::envelope::{PRODUCT_CREATED, PRODUCT_DELETED, PRODUCT_UPDATED, STOCK_UPDATED};
use pulse_core::{Envelope, NotificationSink};

pub(crate) fn announce(sink: &dyn NotificationSink, envelope: &Envelope) {
    match envelope.kind.as_str() {
        PRODUCT_CREATED => sink.success(&format!("New product: {}", name(&envelope.payload))),
        PRODUCT_UPDATED => sink.info(&format!("Product updated: {}", name(&envelope.payload))),
        PRODUCT_DELETED => sink.warning("Product deleted"),
        STOCK_UPDATED => sink.info(&format!(
            "Stock updated: {} → {}",
            name(&envelope.payload),
            quantity(&envelope.payload)
        )),
        _ => {}
    }
}

fn name(payload: &Value) -> &str {
    payload.get("name").and_then(Value::as_str).unwrap_or("unknown")
}

fn quantity(payload: &Value) -> String {
    payload
        .get("quantity")
        .map_or_else(|| "?".to_string(), Value::to_string)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
