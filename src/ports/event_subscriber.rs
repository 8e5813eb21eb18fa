//! EventSubscriber port - Interface for subscribing to realtime events.
//!
//! This port defines how consumers register interest in event types
//! without knowing about the transport that produces them.

use std::sync::{Arc, Weak};

use crate::domain::foundation::{DomainError, SubscriptionId};
use crate::domain::realtime::{EventType, RealtimeEvent};

/// Handler for processing realtime events.
///
/// Handlers run synchronously on the transport's delivery path, so they
/// should be:
/// - **Idempotent** - the same event may be delivered more than once
/// - **Quick** - long work belongs on a spawned task
/// - **Isolated** - an error or panic is logged and never reaches siblings
///
/// # Example
///
/// ```ignore
/// struct FeedRefresher { /* ... */ }
///
/// impl EventHandler for FeedRefresher {
///     fn handle(&self, event: &RealtimeEvent) -> Result<(), DomainError> {
///         let payload: BlogChanged = event.payload_as()?;
///         // Patch the local feed...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "FeedRefresher"
///     }
/// }
/// ```
pub trait EventHandler: Send + Sync {
    /// Process an event.
    fn handle(&self, event: &RealtimeEvent) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Adapts a closure into an [`EventHandler`].
pub struct FnHandler<F> {
    name: &'static str,
    f: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&RealtimeEvent) -> Result<(), DomainError> + Send + Sync,
{
    /// Wraps `f`, logging failures under `name`.
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> EventHandler for FnHandler<F>
where
    F: Fn(&RealtimeEvent) -> Result<(), DomainError> + Send + Sync,
{
    fn handle(&self, event: &RealtimeEvent) -> Result<(), DomainError> {
        (self.f)(event)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// Port for subscribing to realtime events.
///
/// Each call creates independent registrations: subscribing the same
/// handler twice means it runs twice per matching event.
///
/// # Example
///
/// ```ignore
/// let chat = subscriber.subscribe(EventType::MessageSent, chat_session);
/// let typing = subscriber.subscribe_all(&[EventType::TypingStart, EventType::TypingStop], indicator);
/// // ...
/// chat.unsubscribe();
/// ```
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: EventType, handler: Arc<dyn EventHandler>) -> Subscription;

    /// Subscribe handler to multiple event types behind one handle.
    fn subscribe_all(
        &self,
        event_types: &[EventType],
        handler: Arc<dyn EventHandler>,
    ) -> Subscription;
}

/// Registry side of a [`Subscription`]: removes a single registration.
pub trait SubscriptionRegistry: Send + Sync {
    /// Removes exactly the registration `id` under `event_type`.
    ///
    /// Unknown ids are ignored.
    fn remove(&self, event_type: EventType, id: SubscriptionId);
}

/// Handle to one or more registrations on an event bus.
///
/// - [`unsubscribe`](Self::unsubscribe) removes exactly these registrations.
/// - Dropping the handle also unsubscribes.
/// - [`detach`](Self::detach) keeps the registrations for the bus lifetime.
///
/// The handle only holds a weak reference, so it never keeps a bus alive.
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    registry: Option<Weak<dyn SubscriptionRegistry>>,
    entries: Vec<(EventType, SubscriptionId)>,
}

impl Subscription {
    /// Creates a handle for the given registrations.
    pub fn new(
        registry: Weak<dyn SubscriptionRegistry>,
        entries: Vec<(EventType, SubscriptionId)>,
    ) -> Self {
        Self {
            registry: Some(registry),
            entries,
        }
    }

    /// Event types covered by this handle.
    pub fn event_types(&self) -> impl Iterator<Item = EventType> + '_ {
        self.entries.iter().map(|(t, _)| *t)
    }

    /// Whether the handle still controls live registrations.
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .is_some_and(|r| r.strong_count() > 0)
            && !self.entries.is_empty()
    }

    /// Removes these registrations from the bus.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Keeps the registrations alive after the handle is dropped.
    pub fn detach(mut self) {
        self.registry = None;
        self.entries.clear();
    }

    fn release(&mut self) {
        let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) else {
            return;
        };
        for (event_type, id) in self.entries.drain(..) {
            registry.remove(event_type, id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("entries", &self.entries)
            .field("active", &self.is_active())
            .finish()
    }
}
