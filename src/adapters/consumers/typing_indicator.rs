//! TypingIndicator - "is typing" flag for the other participant of a chat.
//!
//! `typing:start` raises the flag until a deadline; each further start
//! pushes the deadline out. `typing:stop` lowers it immediately. If the
//! stop event is lost the flag still expires on its own.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

use crate::adapters::events::InMemoryEventBus;
use crate::domain::chat::Chat;
use crate::domain::foundation::{ChatId, DomainError, UserId};
use crate::domain::realtime::payloads::Typing;
use crate::domain::realtime::{EventType, RealtimeEvent};
use crate::ports::{EventHandler, Subscription};

pub const DEFAULT_TYPING_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TypingIndicator {
    chat_id: ChatId,
    watched_user: UserId,
    timeout: Duration,
    deadline: Mutex<Option<Instant>>,
}

impl TypingIndicator {
    pub fn new(chat_id: ChatId, watched_user: UserId, timeout: Duration) -> Self {
        Self {
            chat_id,
            watched_user,
            timeout,
            deadline: Mutex::new(None),
        }
    }

    /// Watches whoever in `chat` is not `me`. `None` if there is no one.
    pub fn for_chat(chat: &Chat, me: &UserId, timeout: Duration) -> Option<Self> {
        chat.other_participant(me)
            .map(|other| Self::new(chat.id.clone(), other.id.clone(), timeout))
    }

    /// Registers for `typing:start` and `typing:stop`.
    pub fn subscribe(self: Arc<Self>, bus: &InMemoryEventBus) -> Subscription {
        bus.on_all(&[EventType::TypingStart, EventType::TypingStop], self)
    }

    pub fn is_typing(&self) -> bool {
        let deadline = *self.lock();
        deadline.map(|d| Instant::now() < d).unwrap_or(false)
    }

    pub fn watched_user(&self) -> &UserId {
        &self.watched_user
    }

    fn lock(&self) -> MutexGuard<'_, Option<Instant>> {
        self.deadline.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventHandler for TypingIndicator {
    fn handle(&self, event: &RealtimeEvent) -> Result<(), DomainError> {
        let typing: Typing = event.payload_as()?;
        if typing.chat_id != self.chat_id || typing.user_id != self.watched_user {
            return Ok(());
        }

        let mut deadline = self.lock();
        match event.event_type {
            EventType::TypingStart => *deadline = Some(Instant::now() + self.timeout),
            EventType::TypingStop => *deadline = None,
            _ => {}
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "TypingIndicator"
    }
}
