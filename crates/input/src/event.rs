use std::collections::BTreeMap;

/// Notification kinds the host can deliver to the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    PointerMove,
    ViewportResize,
}

/// A notification pushed by the host, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    ViewportResized { width: u32, height: u32 },
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::PointerMoved { .. } => EventKind::PointerMove,
            InputEvent::ViewportResized { .. } => EventKind::ViewportResize,
        }
    }
}

/// Token returned by [`EventSource::attach`]; hand it back to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
    kind: EventKind,
}

impl Subscription {
    pub fn kind(&self) -> EventKind {
        self.kind
    }
}

/// The host side of listener registration.
pub trait EventSource {
    /// Start delivering notifications of `kind`.
    fn attach(&mut self, kind: EventKind) -> Subscription;

    /// Stop delivering notifications for `subscription`. Unknown
    /// subscriptions are ignored.
    fn detach(&mut self, subscription: Subscription);
}

/// Bookkeeping for attached listeners. Hosts consult [`is_attached`] before
/// forwarding a notification.
///
/// [`is_attached`]: ListenerRegistry::is_attached
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    active: BTreeMap<u64, EventKind>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self, kind: EventKind) -> bool {
        self.active.values().any(|k| *k == kind)
    }

    /// Whether `event` should be forwarded right now.
    pub fn accepts(&self, event: &InputEvent) -> bool {
        self.is_attached(event.kind())
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl EventSource for ListenerRegistry {
    fn attach(&mut self, kind: EventKind) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.active.insert(id, kind);
        tracing::debug!(?kind, id, "listener attached");
        Subscription { id, kind }
    }

    fn detach(&mut self, subscription: Subscription) {
        if self.active.remove(&subscription.id).is_some() {
            tracing::debug!(kind = ?subscription.kind, id = subscription.id, "listener detached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kinds() {
        assert_eq!(
            InputEvent::PointerMoved { x: 1.0, y: 2.0 }.kind(),
            EventKind::PointerMove
        );
        assert_eq!(
            InputEvent::ViewportResized { width: 1, height: 1 }.kind(),
            EventKind::ViewportResize
        );
    }

    #[test]
    fn attach_then_detach_leaves_nothing() {
        let mut registry = ListenerRegistry::new();
        let a = registry.attach(EventKind::PointerMove);
        let b = registry.attach(EventKind::ViewportResize);
        assert_eq!(registry.active_count(), 2);
        assert!(registry.accepts(&InputEvent::PointerMoved { x: 0.0, y: 0.0 }));

        registry.detach(a);
        assert!(!registry.is_attached(EventKind::PointerMove));
        assert!(registry.is_attached(EventKind::ViewportResize));

        registry.detach(b);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn detaching_twice_is_harmless() {
        let mut registry = ListenerRegistry::new();
        let a = registry.attach(EventKind::PointerMove);
        registry.detach(a);
        registry.detach(a);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn subscriptions_are_distinct_per_attach() {
        let mut registry = ListenerRegistry::new();
        let a = registry.attach(EventKind::PointerMove);
        let b = registry.attach(EventKind::PointerMove);
        assert_ne!(a, b);
        registry.detach(a);
        // The second listener of the same kind is still live.
        assert!(registry.is_attached(EventKind::PointerMove));
    }
}
