//! Recording doubles for consumer effect ports.

use std::sync::Mutex;

use crate::ports::{QueryCache, QueryKey, Toast, ToastSink};

#[derive(Default)]
pub struct RecordingCache {
    pub keys: Mutex<Vec<QueryKey>>,
}

impl RecordingCache {
    pub fn rendered(&self) -> Vec<String> {
        self.keys.lock().unwrap().iter().map(ToString::to_string).collect()
    }
}

impl QueryCache for RecordingCache {
    fn invalidate(&self, key: &QueryKey) {
        self.keys.lock().unwrap().push(key.clone());
    }
}

#[derive(Default)]
pub struct RecordingToasts {
    pub toasts: Mutex<Vec<Toast>>,
}

impl RecordingToasts {
    pub fn titles(&self) -> Vec<String> {
        self.toasts.lock().unwrap().iter().map(|t| t.title.clone()).collect()
    }
}

impl ToastSink for RecordingToasts {
    fn show(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}
