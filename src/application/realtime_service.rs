//! RealtimeService - One bus and one connection, composed.
//!
//! ## Usage
//!
//! ```ignore
//! let service = RealtimeService::from_config(&config.realtime)?;
//!
//! let _status = service.on_fn(EventType::BlogCreated, "FeedBadge", |event| {
//!     tracing::info!(data = %event.data, "New blog");
//!     Ok(())
//! });
//!
//! service.connect();
//! ```
//!
//! Consumers only ever see the subscribe side of the bus; emitting is
//! reserved for the connection manager.

use std::sync::Arc;

use tokio::sync::watch;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::sse::{ConnectionManager, HttpEventStreamSource};
use crate::config::RealtimeConfig;
use crate::domain::foundation::DomainError;
use crate::domain::realtime::{ConnectionState, EventType, RealtimeEvent, ReconnectPolicy};
use crate::ports::{
    ConnectionMonitor, EventHandler, EventStreamSource, EventSubscriber, Subscription,
    TransportError,
};

/// Facade over the event bus and the connection manager.
///
/// Dropping the service closes the connection. Outstanding
/// `Subscription` handles become inert.
pub struct RealtimeService {
    bus: Arc<InMemoryEventBus>,
    manager: ConnectionManager,
}

impl RealtimeService {
    /// Creates a disconnected service reading from `source`.
    pub fn new(source: Arc<dyn EventStreamSource>, policy: ReconnectPolicy) -> Self {
        let bus = Arc::new(InMemoryEventBus::new());
        let manager = ConnectionManager::new(source, Arc::clone(&bus), policy);
        Self { bus, manager }
    }

    /// Creates a service streaming over HTTP from the configured endpoint.
    pub fn from_config(config: &RealtimeConfig) -> Result<Self, TransportError> {
        let source = HttpEventStreamSource::new(config)?;
        Ok(Self::new(Arc::new(source), config.reconnect_policy()))
    }

    /// Opens the connection unless one exists. Must run inside a Tokio
    /// runtime.
    pub fn connect(&self) {
        self.manager.connect();
    }

    /// Closes the connection. Subscriptions stay registered.
    pub fn disconnect(&self) {
        self.manager.disconnect();
    }

    pub fn reconnect_attempts(&self) -> u32 {
        self.manager.reconnect_attempts()
    }

    /// Registers `handler` for `event_type`.
    pub fn on(&self, event_type: EventType, handler: Arc<dyn EventHandler>) -> Subscription {
        self.bus.on(event_type, handler)
    }

    /// Registers one handler for several types behind one handle.
    pub fn on_all(&self, event_types: &[EventType], handler: Arc<dyn EventHandler>) -> Subscription {
        self.bus.on_all(event_types, handler)
    }

    /// Registers a closure for `event_type`.
    pub fn on_fn<F>(&self, event_type: EventType, name: &'static str, f: F) -> Subscription
    where
        F: Fn(&RealtimeEvent) -> Result<(), DomainError> + Send + Sync + 'static,
    {
        self.bus.on_fn(event_type, name, f)
    }

    pub fn subscriber_count(&self, event_type: EventType) -> usize {
        self.bus.subscriber_count(event_type)
    }

    /// The underlying bus, for consumers' `subscribe` helpers.
    pub fn bus(&self) -> &InMemoryEventBus {
        &self.bus
    }

    /// Read-only view of the connection.
    pub fn monitor(&self) -> &dyn ConnectionMonitor {
        &self.manager
    }

    pub fn endpoint(&self) -> &str {
        self.manager.endpoint()
    }
}

impl ConnectionMonitor for RealtimeService {
    fn state(&self) -> ConnectionState {
        self.manager.state()
    }

    fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.manager.watch_state()
    }
}

impl EventSubscriber for RealtimeService {
    fn subscribe(&self, event_type: EventType, handler: Arc<dyn EventHandler>) -> Subscription {
        self.bus.subscribe(event_type, handler)
    }

    fn subscribe_all(
        &self,
        event_types: &[EventType],
        handler: Arc<dyn EventHandler>,
    ) -> Subscription {
        self.bus.subscribe_all(event_types, handler)
    }
}
