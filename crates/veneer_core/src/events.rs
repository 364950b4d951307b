//! Event dispatch system
//!
//! A document/window-scoped dispatcher. Listeners are held by `Subscription`
//! guards: dropping the guard removes the listener, so a component that
//! subscribes for the duration of a drag cannot leak its handlers.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
    pub const RESIZE: EventType = 40;
}

/// A UI event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer { x: f32, y: f32, button: u8 },
    Resize { width: f32, height: f32 },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            data,
            propagation_stopped: false,
        }
    }

    /// Primary-button pointer event at window coordinates
    pub fn pointer(event_type: EventType, x: f32, y: f32) -> Self {
        Self::new(event_type, EventData::Pointer { x, y, button: 0 })
    }

    pub fn resize(width: f32, height: f32) -> Self {
        Self::new(event_types::RESIZE, EventData::Resize { width, height })
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}

/// Event handler function type
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

new_key_type! {
    /// Unique identifier for a registered listener
    pub struct ListenerId;
}

struct Listener {
    event_type: EventType,
    handler: EventHandler,
}

type Registry = Mutex<SlotMap<ListenerId, Listener>>;

/// Dispatches events to subscribed listeners
///
/// Cloning the dispatcher yields another handle to the same listener set.
#[derive(Clone)]
pub struct EventDispatcher {
    listeners: Arc<Registry>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(SlotMap::with_key())),
        }
    }

    /// Register a listener for an event type
    ///
    /// The listener stays registered until the returned guard is dropped.
    #[must_use = "dropping the subscription immediately removes the listener"]
    pub fn subscribe<F>(&self, event_type: EventType, handler: F) -> Subscription
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = self.listeners.lock().insert(Listener {
            event_type,
            handler: Arc::new(handler),
        });
        tracing::trace!(?id, event_type, "listener subscribed");

        Subscription {
            id,
            registry: Arc::downgrade(&self.listeners),
        }
    }

    /// Dispatch an event to all listeners of its type
    ///
    /// Handlers run without the registry lock held, so a handler may
    /// subscribe or drop subscriptions (including its own) while running.
    pub fn dispatch(&self, event: &mut Event) {
        let handlers: SmallVec<[EventHandler; 4]> = self
            .listeners
            .lock()
            .values()
            .filter(|listener| listener.event_type == event.event_type)
            .map(|listener| Arc::clone(&listener.handler))
            .collect();

        for handler in handlers {
            if event.propagation_stopped {
                break;
            }
            handler(event);
        }
    }

    /// Number of listeners currently registered for an event type
    pub fn listener_count(&self, event_type: EventType) -> usize {
        self.listeners
            .lock()
            .values()
            .filter(|listener| listener.event_type == event_type)
            .count()
    }

    /// Total number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.lock().is_empty()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for a registered listener
///
/// Removes the listener from its dispatcher when dropped. Outliving the
/// dispatcher is fine: the guard then does nothing.
pub struct Subscription {
    id: ListenerId,
    registry: Weak<Registry>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.lock().contains_key(self.id))
    }

    /// Remove the listener now
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if registry.lock().remove(self.id).is_some() {
                tracing::trace!(id = ?self.id, "listener released");
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::event_types::*;
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counter() -> (Arc<AtomicU32>, Arc<AtomicU32>) {
        let count = Arc::new(AtomicU32::new(0));
        (count.clone(), count)
    }

    #[test]
    fn test_dispatch_by_type() {
        let document = EventDispatcher::new();
        let (moves, moves_clone) = counter();
        let (ups, ups_clone) = counter();

        let _move = document.subscribe(POINTER_MOVE, move |_| {
            moves_clone.fetch_add(1, Ordering::SeqCst);
        });
        let _up = document.subscribe(POINTER_UP, move |_| {
            ups_clone.fetch_add(1, Ordering::SeqCst);
        });

        document.dispatch(&mut Event::pointer(POINTER_MOVE, 1.0, 2.0));
        document.dispatch(&mut Event::pointer(POINTER_MOVE, 1.0, 3.0));
        document.dispatch(&mut Event::pointer(POINTER_UP, 1.0, 3.0));

        assert_eq!(moves.load(Ordering::SeqCst), 2);
        assert_eq!(ups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let document = EventDispatcher::new();
        let (count, count_clone) = counter();

        let subscription = document.subscribe(POINTER_MOVE, move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert!(subscription.is_active());
        assert_eq!(document.listener_count(POINTER_MOVE), 1);

        subscription.unsubscribe();
        assert_eq!(document.listener_count(POINTER_MOVE), 0);
        assert!(document.is_empty());

        document.dispatch(&mut Event::pointer(POINTER_MOVE, 0.0, 0.0));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handler_can_release_its_own_subscription() {
        let document = EventDispatcher::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let slot_clone = slot.clone();

        let subscription = document.subscribe(POINTER_UP, move |_| {
            slot_clone.lock().take();
        });
        *slot.lock() = Some(subscription);

        document.dispatch(&mut Event::pointer(POINTER_UP, 0.0, 0.0));
        assert!(slot.lock().is_none());
        assert_eq!(document.listener_count(POINTER_UP), 0);
    }

    #[test]
    fn test_stop_propagation() {
        let document = EventDispatcher::new();
        let (count, count_clone) = counter();
        let count_second = count.clone();

        let _first = document.subscribe(RESIZE, move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        let _second = document.subscribe(RESIZE, move |_| {
            count_second.fetch_add(1, Ordering::SeqCst);
        });

        let mut event = Event::resize(800.0, 600.0);
        event.stop_propagation();
        document.dispatch(&mut event);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscription_outlives_dispatcher() {
        let document = EventDispatcher::new();
        let subscription = document.subscribe(RESIZE, |_| {});
        drop(document);

        assert!(!subscription.is_active());
        drop(subscription);
    }
}
