//! ToastSink port - Where transient user-facing notices are shown.

use std::time::Duration;

/// A short-lived notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub duration: Duration,
}

impl Toast {
    /// Creates a toast.
    pub fn new(title: impl Into<String>, description: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            duration,
        }
    }
}

/// Port for displaying toasts.
pub trait ToastSink: Send + Sync {
    /// Shows a toast. Must not block.
    fn show(&self, toast: Toast);
}
