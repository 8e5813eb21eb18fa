//! In-app notifications received over the realtime stream.

use serde::Serialize;

use crate::domain::foundation::{NotificationId, Timestamp, UserId};
use crate::domain::realtime::payloads::{BlogRef, NotificationNew, UserRef};

/// Kind used when the backend does not name one.
pub const DEFAULT_NOTIFICATION_KIND: &str = "like";

/// A notification shown in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: String,
    pub message: String,
    pub actor: Option<UserRef>,
    pub target_blog: Option<BlogRef>,
    pub timestamp: Timestamp,
    pub read: bool,
}

impl Notification {
    /// Builds an unread notification from a pushed payload.
    pub fn from_payload(payload: NotificationNew, received_at: Timestamp) -> Self {
        Self {
            id: NotificationId::new(),
            kind: payload
                .kind
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_KIND.to_string()),
            message: payload.message,
            actor: payload.actor,
            target_blog: payload.target_blog,
            timestamp: payload.timestamp.unwrap_or(received_at),
            read: false,
        }
    }
}

/// Whether a notification addressed to `recipient` should be shown to
/// `current_user`. Untargeted notifications are shown to everyone.
pub fn is_addressed_to(recipient: Option<&UserId>, current_user: Option<&UserId>) -> bool {
    match (recipient, current_user) {
        (Some(recipient), Some(me)) => recipient == me,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(kind: Option<&str>) -> NotificationNew {
        NotificationNew {
            kind: kind.map(str::to_string),
            message: "Ada liked your post".to_string(),
            actor: None,
            target_blog: None,
            recipient_id: None,
            timestamp: None,
        }
    }

    #[test]
    fn from_payload_defaults_kind_to_like() {
        let n = Notification::from_payload(payload(None), Timestamp::now());
        assert_eq!(n.kind, "like");
        assert!(!n.read);
    }

    #[test]
    fn from_payload_keeps_kind() {
        let n = Notification::from_payload(payload(Some("follow")), Timestamp::now());
        assert_eq!(n.kind, "follow");
    }

    #[test]
    fn addressing_rules() {
        let me = UserId::new("me").unwrap();
        let other = UserId::new("other").unwrap();

        assert!(is_addressed_to(None, Some(&me)));
        assert!(is_addressed_to(Some(&me), Some(&me)));
        assert!(!is_addressed_to(Some(&other), Some(&me)));
        // Signed-out clients see targeted notifications too
        assert!(is_addressed_to(Some(&other), None));
    }
}
