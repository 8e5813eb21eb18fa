//! NotificationFeed - In-memory feed of pushed notifications.
//!
//! New notifications are prepended unread and announced with a toast.
//! Notifications addressed to another user are ignored.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::adapters::events::InMemoryEventBus;
use crate::domain::foundation::{DomainError, NotificationId, Timestamp, UserId};
use crate::domain::notification::{is_addressed_to, Notification};
use crate::domain::realtime::payloads::NotificationNew;
use crate::domain::realtime::{EventType, RealtimeEvent};
use crate::ports::{EventHandler, Subscription, Toast, ToastSink};

pub const NOTIFICATION_TOAST_DURATION: Duration = Duration::from_secs(5);

/// Newest-first list of notifications for the signed-in user.
pub struct NotificationFeed {
    current_user: Option<UserId>,
    toasts: Arc<dyn ToastSink>,
    items: Mutex<Vec<Notification>>,
}

impl NotificationFeed {
    /// `current_user` is `None` for anonymous sessions, which see every
    /// notification.
    pub fn new(current_user: Option<UserId>, toasts: Arc<dyn ToastSink>) -> Self {
        Self {
            current_user,
            toasts,
            items: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(self: Arc<Self>, bus: &InMemoryEventBus) -> Subscription {
        bus.on(EventType::NotificationNew, self)
    }

    fn items(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.items().clone()
    }

    pub fn unread_count(&self) -> usize {
        self.items().iter().filter(|n| !n.read).count()
    }

    /// Returns `false` if no notification has this id.
    pub fn mark_as_read(&self, id: &NotificationId) -> bool {
        match self.items().iter_mut().find(|n| &n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_as_read(&self) {
        for notification in self.items().iter_mut() {
            notification.read = true;
        }
    }

    /// Removes one notification. Returns `false` if it was not present.
    pub fn remove(&self, id: &NotificationId) -> bool {
        let mut items = self.items();
        let before = items.len();
        items.retain(|n| &n.id != id);
        items.len() != before
    }

    pub fn clear(&self) {
        self.items().clear();
    }

    /// Timestamp of the newest notification, if any.
    pub fn latest_timestamp(&self) -> Option<Timestamp> {
        self.items().first().map(|n| n.timestamp)
    }
}

impl EventHandler for NotificationFeed {
    fn handle(&self, event: &RealtimeEvent) -> Result<(), DomainError> {
        let payload: NotificationNew = event.payload_as()?;
        if !is_addressed_to(payload.recipient_id.as_ref(), self.current_user.as_ref()) {
            tracing::trace!("Ignoring notification addressed to another user");
            return Ok(());
        }

        let notification = Notification::from_payload(payload, event.timestamp);
        let toast = Toast::new(
            format!("New {}!", notification.kind),
            notification.message.clone(),
            NOTIFICATION_TOAST_DURATION,
        );
        self.items().insert(0, notification);
        self.toasts.show(toast);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "NotificationFeed"
    }
}
