//! Event Bus implementation.
//!
//! Provides the EventBus struct shared by the polygon store and drawing
//! sessions.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Type alias for event handler functions
type EventHandler = Arc<dyn Fn(&AppEvent) + Send + Sync>;

/// Capacity of the broadcast channel used by polling receivers.
pub const CHANNEL_CAPACITY: usize = 256;

/// Error types for event bus operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    /// No subscribers are listening
    #[error("No active subscribers")]
    NoSubscribers,
}

/// Event bus for store and drawing notifications
pub struct EventBus {
    /// Broadcast channel sender
    sender: broadcast::Sender<AppEvent>,
    /// Registered synchronous handlers
    handlers: RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Publish an event to all subscribers
    ///
    /// Handlers are collected first and invoked without holding the
    /// registry lock, so a handler may subscribe, unsubscribe, or trigger
    /// further publishes. Returns the number of subscribers reached.
    pub fn publish(&self, event: AppEvent) -> Result<usize, EventBusError> {
        let matching: Vec<EventHandler> = self
            .handlers
            .read()
            .values()
            .filter(|(filter, _)| filter.matches(&event))
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in &matching {
            handler(&event);
        }

        // Send via broadcast channel for polling receivers
        let received = self.sender.send(event).unwrap_or(0);
        let reached = matching.len() + received;
        if reached == 0 {
            Err(EventBusError::NoSubscribers)
        } else {
            Ok(reached)
        }
    }

    /// Subscribe to events with a synchronous handler
    ///
    /// The handler will be called on the publishing thread, so it should
    /// return quickly.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers
            .write()
            .insert(id, (filter, Arc::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Get a receiver for polling events on the next render
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of callback subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_bus::events::{DrawingEvent, StoreEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cleared(revision: u64) -> AppEvent {
        AppEvent::Store(StoreEvent::Cleared {
            revision,
            removed: 0,
        })
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let bus = EventBus::new();

        let id = bus.subscribe(EventFilter::All, |_| {});
        assert_eq!(bus.subscriber_count(), 1);

        assert!(bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);

        // Double unsubscribe should return false
        assert!(!bus.unsubscribe(id));
    }

    #[test]
    fn test_event_delivery() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        bus.subscribe(EventFilter::All, move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(bus.publish(cleared(1)).unwrap(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new();
        assert!(matches!(
            bus.publish(cleared(1)),
            Err(EventBusError::NoSubscribers)
        ));
    }

    #[test]
    fn test_event_filtering() {
        let bus = EventBus::new();
        let store_count = Arc::new(AtomicUsize::new(0));
        let drawing_count = Arc::new(AtomicUsize::new(0));

        let sc = store_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Store]),
            move |_| {
                sc.fetch_add(1, Ordering::SeqCst);
            },
        );

        let dc = drawing_count.clone();
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Drawing]),
            move |_| {
                dc.fetch_add(1, Ordering::SeqCst);
            },
        );

        bus.publish(cleared(1)).ok();
        bus.publish(AppEvent::Drawing(DrawingEvent::Rearmed)).ok();
        bus.publish(AppEvent::Drawing(DrawingEvent::Rearmed)).ok();

        assert_eq!(store_count.load(Ordering::SeqCst), 1);
        assert_eq!(drawing_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_handler_may_unsubscribe_itself() {
        let bus = Arc::new(EventBus::new());
        let slot: Arc<parking_lot::Mutex<Option<SubscriptionId>>> = Arc::default();

        let bus_clone = Arc::clone(&bus);
        let slot_clone = Arc::clone(&slot);
        let id = bus.subscribe(EventFilter::All, move |_| {
            if let Some(id) = slot_clone.lock().take() {
                bus_clone.unsubscribe(id);
            }
        });
        *slot.lock() = Some(id);

        bus.publish(cleared(1)).ok();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_polling_receiver() {
        let bus = EventBus::new();
        let mut receiver = bus.receiver();

        bus.publish(cleared(4)).ok();

        match receiver.try_recv() {
            Ok(AppEvent::Store(event)) => assert_eq!(event.revision(), 4),
            other => panic!("Wrong event received: {:?}", other),
        }
        assert!(receiver.try_recv().is_err());
    }
}
