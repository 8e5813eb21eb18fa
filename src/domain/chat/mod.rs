//! Chat conversation state as held by a client displaying one chat.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChatId, MessageId, Timestamp, UserId};
use crate::domain::realtime::payloads::{MessageRead, MessageSent, UserRef};

/// Participant of a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatParticipant {
    pub id: UserId,
    pub name: String,
    pub avatar: Option<String>,
}

/// One message in a chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: UserRef,
    pub content: String,
    pub read: bool,
    pub created_at: Timestamp,
    pub read_at: Option<Timestamp>,
}

/// A conversation and its message history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub participants: Vec<ChatParticipant>,
    pub messages: Vec<ChatMessage>,
    pub last_message: Option<String>,
    pub last_message_time: Option<Timestamp>,
    pub last_message_sender: Option<UserRef>,
}

impl Chat {
    /// Creates an empty chat between the given participants.
    pub fn new(id: ChatId, participants: Vec<ChatParticipant>) -> Self {
        Self {
            id,
            participants,
            messages: Vec::new(),
            last_message: None,
            last_message_time: None,
            last_message_sender: None,
        }
    }

    /// Whether a message with this id is already present.
    pub fn contains_message(&self, id: &MessageId) -> bool {
        self.messages.iter().any(|m| &m.id == id)
    }

    /// First participant that is not `me`.
    pub fn other_participant(&self, me: &UserId) -> Option<&ChatParticipant> {
        self.participants.iter().find(|p| &p.id != me)
    }

    /// Appends a pushed message and updates the last-message summary.
    ///
    /// Returns `false` (and changes nothing) when the message is already
    /// present, so duplicate deliveries are harmless.
    pub fn apply_sent(&mut self, sent: &MessageSent, received_at: Timestamp) -> bool {
        if self.contains_message(&sent.message_id) {
            return false;
        }

        let created_at = sent.timestamp.unwrap_or(received_at);
        self.messages.push(ChatMessage {
            id: sent.message_id.clone(),
            sender: sent.sender.clone(),
            content: sent.content.clone(),
            read: false,
            created_at,
            read_at: None,
        });
        self.last_message = Some(sent.content.clone());
        self.last_message_time = Some(created_at);
        self.last_message_sender = Some(sent.sender.clone());
        true
    }

    /// Marks a message as read. Returns `false` if the message is unknown.
    pub fn apply_read(&mut self, read: &MessageRead, received_at: Timestamp) -> bool {
        match self.messages.iter_mut().find(|m| m.id == read.message_id) {
            Some(message) => {
                message.read = true;
                message.read_at = Some(read.timestamp.unwrap_or(received_at));
                true
            }
            None => false,
        }
    }
}
