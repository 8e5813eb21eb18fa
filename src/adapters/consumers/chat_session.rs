//! ChatSession - Keeps one open chat in sync with pushed messages.
//!
//! The caller fetches the chat history and hands it over with `load`.
//! Until then pushed events are ignored; the fetched history already
//! reflects them or will on the next fetch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::adapters::events::InMemoryEventBus;
use crate::domain::chat::Chat;
use crate::domain::foundation::{ChatId, DomainError};
use crate::domain::realtime::payloads::{MessageRead, MessageSent};
use crate::domain::realtime::{EventType, RealtimeEvent};
use crate::ports::{EventHandler, Subscription, Toast, ToastSink};

pub const MESSAGE_TOAST_DURATION: Duration = Duration::from_secs(5);

/// Live view of a single chat.
///
/// Duplicate `message:sent` deliveries are skipped by message id, so the
/// session is safe to subscribe without deduplication.
pub struct ChatSession {
    chat_id: ChatId,
    toasts: Arc<dyn ToastSink>,
    chat: Mutex<Option<Chat>>,
}

impl ChatSession {
    pub fn new(chat_id: ChatId, toasts: Arc<dyn ToastSink>) -> Self {
        Self {
            chat_id,
            toasts,
            chat: Mutex::new(None),
        }
    }

    /// Registers for `message:sent` and `message:read`.
    pub fn subscribe(self: Arc<Self>, bus: &InMemoryEventBus) -> Subscription {
        bus.on_all(&[EventType::MessageSent, EventType::MessageRead], self)
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    /// Installs the fetched chat. A chat with a different id is rejected.
    pub fn load(&self, chat: Chat) -> Result<(), DomainError> {
        if chat.id != self.chat_id {
            return Err(DomainError::validation(
                "chat",
                format!("expected chat {}, got {}", self.chat_id, chat.id),
            ));
        }
        *self.lock() = Some(chat);
        Ok(())
    }

    /// Snapshot of the current chat, if loaded.
    pub fn chat(&self) -> Option<Chat> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Chat>> {
        self.chat.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn on_sent(&self, sent: MessageSent, event: &RealtimeEvent) {
        let applied = match self.lock().as_mut() {
            Some(chat) => chat.apply_sent(&sent, event.timestamp),
            None => {
                tracing::trace!(chat_id = %self.chat_id, "Message before chat loaded, ignoring");
                return;
            }
        };

        if applied {
            self.toasts.show(Toast::new(
                format!("Message from {}", sent.sender.name),
                sent.content,
                MESSAGE_TOAST_DURATION,
            ));
        } else {
            tracing::debug!(message_id = %sent.message_id, "Duplicate message skipped");
        }
    }

    fn on_read(&self, read: MessageRead, event: &RealtimeEvent) {
        if let Some(chat) = self.lock().as_mut() {
            if !chat.apply_read(&read, event.timestamp) {
                tracing::debug!(message_id = %read.message_id, "Read receipt for unknown message");
            }
        }
    }
}

impl EventHandler for ChatSession {
    fn handle(&self, event: &RealtimeEvent) -> Result<(), DomainError> {
        match event.event_type {
            EventType::MessageSent => {
                let sent: MessageSent = event.payload_as()?;
                if sent.chat_id == self.chat_id {
                    self.on_sent(sent, event);
                }
            }
            EventType::MessageRead => {
                let read: MessageRead = event.payload_as()?;
                if read.chat_id == self.chat_id {
                    self.on_read(read, event);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ChatSession"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::consumers::test_support::RecordingToasts;
    use crate::domain::chat::ChatParticipant;
    use crate::domain::foundation::{MessageId, UserId};
    use serde_json::json;

    fn participant(id: &str, name: &str) -> ChatParticipant {
        ChatParticipant {
            id: UserId::new(id).unwrap(),
            name: name.to_string(),
            avatar: None,
        }
    }

    fn session() -> (Arc<RecordingToasts>, ChatSession) {
        let toasts = Arc::new(RecordingToasts::default());
        let session = ChatSession::new(ChatId::new("c1").unwrap(), toasts.clone());
        (toasts, session)
    }

    fn loaded() -> (Arc<RecordingToasts>, ChatSession) {
        let (toasts, session) = session();
        session
            .load(Chat::new(
                ChatId::new("c1").unwrap(),
                vec![participant("me", "Me"), participant("u2", "Grace")],
            ))
            .unwrap();
        (toasts, session)
    }

    fn sent(chat: &str, message: &str) -> RealtimeEvent {
        RealtimeEvent::new(
            EventType::MessageSent,
            json!({
                "chatId": chat,
                "messageId": message,
                "sender": {"id": "u2", "name": "Grace"},
                "content": "hi",
                "timestamp": "2024-01-15T10:30:00Z"
            }),
        )
    }

    #[test]
    fn message_is_appended_and_toasted() {
        let (toasts, session) = loaded();
        session.handle(&sent("c1", "m1")).unwrap();

        let chat = session.chat().unwrap();
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.last_message.as_deref(), Some("hi"));
        assert_eq!(chat.last_message_sender.unwrap().name, "Grace");

        let shown = toasts.toasts.lock().unwrap();
        assert_eq!(shown[0].title, "Message from Grace");
        assert_eq!(shown[0].description, "hi");
        assert_eq!(shown[0].duration, Duration::from_secs(5));
    }

    #[test]
    fn duplicate_message_is_applied_once() {
        let (toasts, session) = loaded();
        session.handle(&sent("c1", "m1")).unwrap();
        session.handle(&sent("c1", "m1")).unwrap();

        assert_eq!(session.chat().unwrap().messages.len(), 1);
        assert_eq!(toasts.titles().len(), 1);
    }

    #[test]
    fn other_chats_are_ignored() {
        let (toasts, session) = loaded();
        session.handle(&sent("c2", "m1")).unwrap();

        assert!(session.chat().unwrap().messages.is_empty());
        assert!(toasts.titles().is_empty());
    }

    #[test]
    fn events_before_load_are_ignored() {
        let (toasts, session) = session();
        session.handle(&sent("c1", "m1")).unwrap();

        assert!(session.chat().is_none());
        assert!(toasts.titles().is_empty());
    }

    #[test]
    fn read_receipt_marks_message() {
        let (_, session) = loaded();
        session.handle(&sent("c1", "m1")).unwrap();
        session
            .handle(&RealtimeEvent::new(
                EventType::MessageRead,
                json!({"chatId": "c1", "messageId": "m1", "timestamp": "2024-01-15T10:31:00Z"}),
            ))
            .unwrap();

        let chat = session.chat().unwrap();
        let message = &chat.messages[0];
        assert_eq!(message.id, MessageId::new("m1").unwrap());
        assert!(message.read);
        assert!(message.read_at.is_some());
    }

    #[test]
    fn read_receipt_before_message_is_harmless() {
        let (_, session) = loaded();
        session
            .handle(&RealtimeEvent::new(
                EventType::MessageRead,
                json!({"chatId": "c1", "messageId": "m9"}),
            ))
            .unwrap();

        assert!(session.chat().unwrap().messages.is_empty());
    }

    #[test]
    fn load_rejects_other_chat() {
        let (_, session) = session();
        let other = Chat::new(ChatId::new("c2").unwrap(), Vec::new());
        assert!(session.load(other).is_err());
    }
}
