//! ConnectionStatusIndicator - "Live" / "Offline" badge and last event.
//!
//! Status is pushed by the connection manager's watch channel; nothing
//! here polls.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::adapters::events::InMemoryEventBus;
use crate::domain::foundation::DomainError;
use crate::domain::realtime::{ConnectionState, EventType, RealtimeEvent};
use crate::ports::{ConnectionMonitor, EventHandler, Subscription};

pub struct ConnectionStatusIndicator {
    current: watch::Receiver<ConnectionState>,
    changes: tokio::sync::Mutex<watch::Receiver<ConnectionState>>,
    last_event: Mutex<Option<RealtimeEvent>>,
}

impl ConnectionStatusIndicator {
    pub fn new(monitor: &dyn ConnectionMonitor) -> Self {
        let rx = monitor.watch_state();
        Self {
            current: rx.clone(),
            changes: tokio::sync::Mutex::new(rx),
            last_event: Mutex::new(None),
        }
    }

    /// Records the last event of every type.
    pub fn subscribe(self: Arc<Self>, bus: &InMemoryEventBus) -> Subscription {
        bus.on_all(EventType::ALL, self)
    }

    pub fn state(&self) -> ConnectionState {
        *self.current.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    /// "Live" while connected, "Offline" otherwise.
    pub fn status_label(&self) -> &'static str {
        self.state().label()
    }

    /// Waits for the next state transition.
    ///
    /// Returns `None` once the connection manager is gone.
    pub async fn wait_for_change(&self) -> Option<ConnectionState> {
        let mut rx = self.changes.lock().await;
        rx.changed().await.ok()?;
        let state = *rx.borrow_and_update();
        Some(state)
    }

    pub fn last_event(&self) -> Option<RealtimeEvent> {
        self.last().clone()
    }

    fn last(&self) -> MutexGuard<'_, Option<RealtimeEvent>> {
        self.last_event.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventHandler for ConnectionStatusIndicator {
    fn handle(&self, event: &RealtimeEvent) -> Result<(), DomainError> {
        *self.last() = Some(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ConnectionStatusIndicator"
    }
}
