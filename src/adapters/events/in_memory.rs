//! In-memory event bus.
//!
//! Synchronous, in-process delivery of realtime events from the transport
//! to registered handlers.
//!
//! # Delivery
//!
//! - Handlers for a type run in registration order, once per registration
//! - The registry lock is released before any handler runs, so handlers may
//!   subscribe or unsubscribe from inside a callback
//! - A handler that errors or panics is logged and skipped; the rest still
//!   receive the event
//! - Nothing is buffered: events emitted before a handler subscribes are
//!   never replayed to it
//!
//! # Example
//!
//! ```ignore
//! let bus = InMemoryEventBus::new();
//!
//! let subscription = bus.on_fn(EventType::MessageSent, "ChatLog", |event| {
//!     println!("{}", event.data);
//!     Ok(())
//! });
//!
//! // Later
//! subscription.unsubscribe();
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use crate::domain::foundation::{DomainError, SubscriptionId};
use crate::domain::realtime::{EventType, RealtimeEvent};
use crate::ports::{EventHandler, EventSubscriber, FnHandler, Subscription, SubscriptionRegistry};

/// One handler registered under one event type.
struct Registration {
    id: SubscriptionId,
    handler: Arc<dyn EventHandler>,
}

/// Registry shared between the bus and the subscription handles it issues.
#[derive(Default)]
struct HandlerRegistry {
    handlers: RwLock<HashMap<EventType, Vec<Registration>>>,
    next_id: AtomicU64,
}

impl HandlerRegistry {
    // A panicking handler never runs under the lock, so poisoning cannot
    // leave the map half-updated.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<EventType, Vec<Registration>>> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<EventType, Vec<Registration>>> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl SubscriptionRegistry for HandlerRegistry {
    fn remove(&self, event_type: EventType, id: SubscriptionId) {
        let mut handlers = self.write();
        if let Some(registrations) = handlers.get_mut(&event_type) {
            registrations.retain(|r| r.id != id);
            if registrations.is_empty() {
                handlers.remove(&event_type);
            }
        }
    }
}

/// In-process typed publish/subscribe registry.
///
/// Each bus is an independent instance; the application constructs one at
/// start-up and injects it where needed.
#[derive(Default)]
pub struct InMemoryEventBus {
    registry: Arc<HandlerRegistry>,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `event_type`.
    pub fn on(&self, event_type: EventType, handler: Arc<dyn EventHandler>) -> Subscription {
        self.subscribe(event_type, handler)
    }

    /// Registers a closure for `event_type`.
    pub fn on_fn<F>(&self, event_type: EventType, name: &'static str, f: F) -> Subscription
    where
        F: Fn(&RealtimeEvent) -> Result<(), DomainError> + Send + Sync + 'static,
    {
        self.subscribe(event_type, Arc::new(FnHandler::new(name, f)))
    }

    /// Registers one handler for several event types behind one handle.
    pub fn on_all(&self, event_types: &[EventType], handler: Arc<dyn EventHandler>) -> Subscription {
        self.subscribe_all(event_types, handler)
    }

    /// Number of live registrations for `event_type`.
    pub fn subscriber_count(&self, event_type: EventType) -> usize {
        self.registry
            .read()
            .get(&event_type)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Delivers `event` to every handler currently registered for its type.
    ///
    /// Returns how many handlers completed successfully. Only the transport
    /// calls this; consumers never publish.
    pub(crate) fn emit(&self, event: &RealtimeEvent) -> usize {
        // Snapshot the handlers so none runs under the lock
        let handlers: Vec<Arc<dyn EventHandler>> = self
            .registry
            .read()
            .get(&event.event_type)
            .map(|registrations| {
                registrations
                    .iter()
                    .map(|r| Arc::clone(&r.handler))
                    .collect()
            })
            .unwrap_or_default();

        let mut delivered = 0;
        for handler in handlers {
            match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(event))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    tracing::warn!(
                        handler = handler.name(),
                        event_type = %event.event_type,
                        error = %e,
                        "Event handler failed"
                    );
                }
                Err(panic) => {
                    let error = DomainError::handler_panicked(handler.name(), panic_message(&panic));
                    tracing::error!(
                        handler = handler.name(),
                        event_type = %event.event_type,
                        error = %error,
                        "Event handler panicked"
                    );
                }
            }
        }

        delivered
    }

    fn registry_handle(&self) -> Weak<dyn SubscriptionRegistry> {
        let registry: Arc<dyn SubscriptionRegistry> = self.registry.clone();
        Arc::downgrade(&registry)
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: EventType, handler: Arc<dyn EventHandler>) -> Subscription {
        self.subscribe_all(&[event_type], handler)
    }

    fn subscribe_all(
        &self,
        event_types: &[EventType],
        handler: Arc<dyn EventHandler>,
    ) -> Subscription {
        let mut entries = Vec::with_capacity(event_types.len());
        {
            let mut handlers = self.registry.write();
            for event_type in event_types {
                let id = self.registry.next_id();
                handlers.entry(*event_type).or_default().push(Registration {
                    id,
                    handler: Arc::clone(&handler),
                });
                entries.push((*event_type, id));
            }
        }

        tracing::debug!(
            handler = handler.name(),
            event_types = ?event_types,
            "Handler subscribed"
        );

        Subscription::new(self.registry_handle(), entries)
    }
}

fn panic_message(panic: &Box<dyn Any + Send>) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
