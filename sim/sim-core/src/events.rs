//! Vessel-modified notifications.
//!
//! The [`EventBus`] is a registry of handler identities. It does not call
//! anything itself: a broadcast returns the handlers registered at that
//! moment and the owner of the handlers invokes each one. This keeps the bus
//! free of borrowed closures, so a handler may freely edit the world and
//! unregister itself while a broadcast is being delivered.
//!
//! Guarantees:
//!
//! - a handler appears at most once in any broadcast snapshot;
//! - registering an already registered handler is a no-op;
//! - unregistering an unknown handler is a no-op.

use sim_types::{HandlerId, VesselId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Notification that a vessel's membership may have changed.
///
/// The vessel is a hint only. Handlers must re-read membership themselves
/// rather than trust it to name the vessel they care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VesselModified {
    /// Vessel the change originated from, when known.
    pub vessel: Option<VesselId>,
}

impl VesselModified {
    /// Notification naming a vessel.
    #[must_use]
    pub const fn of(vessel: VesselId) -> Self {
        Self {
            vessel: Some(vessel),
        }
    }

    /// Notification with no vessel hint.
    #[must_use]
    pub const fn unspecified() -> Self {
        Self { vessel: None }
    }
}

/// Observer registry keyed by handler identity.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EventBus {
    /// Registered handlers in registration order.
    handlers: Vec<HandlerId>,
    /// Next handler identity to hand out.
    next_handler_id: u64,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh handler identity. The handler is not registered.
    pub fn allocate_handler(&mut self) -> HandlerId {
        let id = HandlerId::new(self.next_handler_id);
        self.next_handler_id += 1;
        id
    }

    /// Register a handler.
    ///
    /// Returns `false` if it was already registered.
    pub fn subscribe(&mut self, handler: HandlerId) -> bool {
        if self.handlers.contains(&handler) {
            return false;
        }
        self.handlers.push(handler);
        true
    }

    /// Unregister a handler.
    ///
    /// Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, handler: HandlerId) -> bool {
        let Some(index) = self.handlers.iter().position(|h| *h == handler) else {
            return false;
        };
        self.handlers.remove(index);
        true
    }

    /// Check whether a handler is registered.
    #[must_use]
    pub fn is_subscribed(&self, handler: HandlerId) -> bool {
        self.handlers.contains(&handler)
    }

    /// Handlers that should receive a broadcast issued now.
    #[must_use]
    pub fn snapshot(&self) -> Vec<HandlerId> {
        self.handlers.clone()
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check whether no handler is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_is_idempotent() {
        let mut bus = EventBus::new();
        let h = bus.allocate_handler();

        assert!(bus.subscribe(h));
        assert!(!bus.subscribe(h));
        assert_eq!(bus.len(), 1);
        assert_eq!(bus.snapshot(), vec![h]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let mut bus = EventBus::new();
        let h = bus.allocate_handler();
        bus.subscribe(h);

        assert!(bus.unsubscribe(h));
        assert!(!bus.unsubscribe(h));
        assert!(bus.is_empty());
        assert!(!bus.is_subscribed(h));
    }

    #[test]
    fn test_allocated_handlers_are_distinct() {
        let mut bus = EventBus::new();
        let a = bus.allocate_handler();
        let b = bus.allocate_handler();
        assert_ne!(a, b);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_snapshot_keeps_registration_order() {
        let mut bus = EventBus::new();
        let a = bus.allocate_handler();
        let b = bus.allocate_handler();
        let c = bus.allocate_handler();
        bus.subscribe(b);
        bus.subscribe(a);
        bus.subscribe(c);
        bus.unsubscribe(a);

        assert_eq!(bus.snapshot(), vec![b, c]);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_changes() {
        let mut bus = EventBus::new();
        let a = bus.allocate_handler();
        bus.subscribe(a);

        let snapshot = bus.snapshot();
        bus.unsubscribe(a);

        assert_eq!(snapshot, vec![a]);
        assert!(bus.is_empty());
    }
}
