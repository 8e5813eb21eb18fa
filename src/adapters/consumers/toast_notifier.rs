//! BlogToastNotifier - Announces newly published blogs.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::events::InMemoryEventBus;
use crate::domain::foundation::DomainError;
use crate::domain::realtime::payloads::BlogChanged;
use crate::domain::realtime::{EventType, RealtimeEvent};
use crate::ports::{EventHandler, Subscription, Toast, ToastSink};

pub const NEW_BLOG_TITLE: &str = "New Blog Published!";
pub const NEW_BLOG_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Shows a toast for every `blog:created`, regardless of cache settings.
pub struct BlogToastNotifier {
    toasts: Arc<dyn ToastSink>,
}

impl BlogToastNotifier {
    pub fn new(toasts: Arc<dyn ToastSink>) -> Self {
        Self { toasts }
    }

    pub fn subscribe(self: Arc<Self>, bus: &InMemoryEventBus) -> Subscription {
        bus.on(EventType::BlogCreated, self)
    }
}

impl EventHandler for BlogToastNotifier {
    fn handle(&self, event: &RealtimeEvent) -> Result<(), DomainError> {
        let blog: BlogChanged = event.payload_as()?;
        let author = blog
            .author
            .map(|a| a.name)
            .unwrap_or_else(|| "Someone".to_string());
        let title = blog.title.unwrap_or_else(|| "Untitled".to_string());

        self.toasts.show(Toast::new(
            NEW_BLOG_TITLE,
            format!("{} just published: \"{}\"", author, title),
            NEW_BLOG_TOAST_DURATION,
        ));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "BlogToastNotifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::consumers::test_support::RecordingToasts;
    use serde_json::json;

    #[test]
    fn new_blog_is_announced() {
        let toasts = Arc::new(RecordingToasts::default());
        let notifier = BlogToastNotifier::new(toasts.clone());

        notifier
            .handle(&RealtimeEvent::new(
                EventType::BlogCreated,
                json!({"id": "b1", "title": "Rust at scale", "author": {"_id": "u1", "name": "Ada"}}),
            ))
            .unwrap();

        let shown = toasts.toasts.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "New Blog Published!");
        assert_eq!(shown[0].description, "Ada just published: \"Rust at scale\"");
        assert_eq!(shown[0].duration, Duration::from_secs(3));
    }

    #[test]
    fn missing_fields_fall_back() {
        let toasts = Arc::new(RecordingToasts::default());
        let notifier = BlogToastNotifier::new(toasts.clone());

        notifier
            .handle(&RealtimeEvent::new(EventType::BlogCreated, json!({})))
            .unwrap();

        assert_eq!(
            toasts.toasts.lock().unwrap()[0].description,
            "Someone just published: \"Untitled\""
        );
    }
}
