//! Typed views of event payloads.
//!
//! The backend owns payload shapes; these structs only name the fields the
//! shipped consumers read. Unknown fields are ignored and most fields are
//! optional so that additive backend changes never break decoding.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BlogId, ChatId, MessageId, Timestamp, UserId};

/// Author or actor reference embedded in payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(default, alias = "_id")]
    pub id: Option<UserId>,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Payload of `blog:created` and `blog:updated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogChanged {
    #[serde(default, alias = "_id")]
    pub id: Option<BlogId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<UserRef>,
}

/// Payload of `blog:deleted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDeleted {
    #[serde(alias = "_id", alias = "blogId")]
    pub id: BlogId,
}

/// Whether a `like:added` event adds or withdraws a like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    #[default]
    Like,
    Unlike,
}

/// Payload of `like:added`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeAdded {
    pub blog_id: BlogId,
    #[serde(default)]
    pub action: LikeAction,
}

/// Payload of `comment:added`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAdded {
    pub blog_id: BlogId,
}

/// Payload of `follow:added`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowAdded {
    pub user_id: UserId,
}

/// Blog reference attached to notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRef {
    #[serde(default, alias = "_id")]
    pub id: Option<BlogId>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Payload of `notification:new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationNew {
    /// Notification kind (`like`, `comment`, `follow`, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub message: String,
    #[serde(default)]
    pub actor: Option<UserRef>,
    #[serde(default)]
    pub target_blog: Option<BlogRef>,
    /// When set, only this user should see the notification.
    #[serde(default)]
    pub recipient_id: Option<UserId>,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

/// Payload of `message:sent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSent {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub sender: UserRef,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

/// Payload of `message:read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRead {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

/// Payload of `typing:start` and `typing:stop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typing {
    pub chat_id: ChatId,
    pub user_id: UserId,
}
