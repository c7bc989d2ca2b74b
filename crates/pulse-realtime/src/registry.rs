//! Subscriber registry: event type → ordered handler list.
//!
//! Entries are created lazily on first subscription and may become empty
//! after unsubscription, but are never removed from the map. Insertion
//! order is invocation order, and the same closure may be registered twice
//! (each registration gets its own id and is invoked independently).

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;

use serde_json::Value;
use tracing::{error, trace};

/// Callback invoked with the payload of every matching event.
pub type EventHandler = Box<dyn FnMut(Value) + Send>;

/// Identity of one registration, assigned by
/// [`EventClient::on`](crate::EventClient::on). Removal matches this id,
/// never closure equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    handlers: HashMap<String, Vec<(SubscriptionId, EventHandler)>>,
}

impl SubscriberRegistry {
    pub(crate) fn subscribe(&mut self, event_type: String, id: SubscriptionId, handler: EventHandler) {
        self.handlers.entry(event_type).or_default().push((id, handler));
    }

    /// Remove one registration. Unknown ids and types are a no-op, and the
    /// (possibly now empty) entry stays in the map.
    pub(crate) fn unsubscribe(&mut self, event_type: &str, id: SubscriptionId) {
        if let Some(list) = self.handlers.get_mut(event_type) {
            list.retain(|(existing, _)| *existing != id);
        }
    }

    /// Invoke every handler registered for `event_type`, in registration
    /// order. Each invocation is isolated: a panicking subscriber is logged
    /// and the remaining handlers still run.
    pub(crate) fn dispatch(&mut self, event_type: &str, payload: &Value) {
        let Some(list) = self.handlers.get_mut(event_type) else {
            trace!(event_type, "no subscribers");
            return;
        };
        for (id, handler) in &mut *list {
            let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| handler(payload.clone())));
            if outcome.is_err() {
                error!(subscription = id.0, event_type, "event handler panicked");
            }
        }
    }

    #[cfg(test)]
    fn handler_count(&self, event_type: &str) -> usize {
        self.handlers.get(event_type).map_or(0, Vec::len)
    }

    #[cfg(test)]
    fn has_entry(&self, event_type: &str) -> bool {
        self.handlers.contains_key(event_type)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use serde_json::json;

    fn counting_handler(counter: &Arc<AtomicU32>) -> EventHandler {
        let counter = counter.clone();
        Box::new(move |_payload| {
            let _ = counter.fetch_add(1, Ordering::Relaxed);
        })
    }

    #[test]
    fn dispatch_invokes_in_registration_order() {
        let mut registry = SubscriberRegistry::default();
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        for label in ["a", "b", "c"] {
            let order = order.clone();
            registry.subscribe(
                "stock.updated".into(),
                SubscriptionId(u64::from(label.as_bytes()[0])),
                Box::new(move |_| order.lock().push(label)),
            );
        }

        registry.dispatch("stock.updated", &json!({}));
        assert_eq!(*order.lock(), vec!["a", "b", "c"]);
    }

    #[test]
    fn dispatch_passes_payload() {
        let mut registry = SubscriberRegistry::default();
        let seen = Arc::new(parking_lot::Mutex::new(None));
        let sink = seen.clone();
        registry.subscribe(
            "product.created".into(),
            SubscriptionId(1),
            Box::new(move |payload| *sink.lock() = Some(payload)),
        );

        registry.dispatch("product.created", &json!({"name": "Anvil"}));
        assert_eq!(seen.lock().as_ref().unwrap()["name"], "Anvil");
    }

    #[test]
    fn unsubscribe_removes_only_that_id() {
        let mut registry = SubscriberRegistry::default();
        let counter = Arc::new(AtomicU32::new(0));
        registry.subscribe("e".into(), SubscriptionId(1), counting_handler(&counter));
        registry.subscribe("e".into(), SubscriptionId(2), counting_handler(&counter));

        registry.unsubscribe("e", SubscriptionId(1));
        registry.dispatch("e", &json!({}));
        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn unsubscribe_twice_is_noop() {
        let mut registry = SubscriberRegistry::default();
        let counter = Arc::new(AtomicU32::new(0));
        registry.subscribe("e".into(), SubscriptionId(1), counting_handler(&counter));

        registry.unsubscribe("e", SubscriptionId(1));
        registry.unsubscribe("e", SubscriptionId(1));
        registry.dispatch("e", &json!({}));
        assert_eq!(counter.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn empty_entry_stays_in_map() {
        let mut registry = SubscriberRegistry::default();
        let counter = Arc::new(AtomicU32::new(0));
        registry.subscribe("e".into(), SubscriptionId(1), counting_handler(&counter));
        registry.unsubscribe("e", SubscriptionId(1));

        assert!(registry.has_entry("e"));
        assert_eq!(registry.handler_count("e"), 0);
    }

    #[test]
    fn duplicate_registrations_both_invoked() {
        let mut registry = SubscriberRegistry::default();
        let counter = Arc::new(AtomicU32::new(0));
        registry.subscribe("e".into(), SubscriptionId(1), counting_handler(&counter));
        registry.subscribe("e".into(), SubscriptionId(2), counting_handler(&counter));

        registry.dispatch("e", &json!({}));
        assert_eq!(counter.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn dispatch_without_subscribers_is_noop() {
        let mut registry = SubscriberRegistry::default();
        registry.dispatch("nobody.listens", &json!({}));
    }

    #[test]
    fn panicking_handler_does_not_block_siblings() {
        let mut registry = SubscriberRegistry::default();
        let counter = Arc::new(AtomicU32::new(0));
        registry.subscribe(
            "e".into(),
            SubscriptionId(1),
            Box::new(|_| panic!("subscriber bug")),
        );
        registry.subscribe("e".into(), SubscriptionId(2), counting_handler(&counter));

        registry.dispatch("e", &json!({}));
        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn stateful_handler_sees_every_dispatch() {
        let mut registry = SubscriberRegistry::default();
        let counter = Arc::new(AtomicU32::new(0));
        registry.subscribe("e".into(), SubscriptionId(1), counting_handler(&counter));

        registry.dispatch("e", &json!({}));
        registry.dispatch("e", &json!({}));
        registry.dispatch("e", &json!({}));
        assert_eq!(counter.load(Ordering::Relaxed), 3);
    }
}
