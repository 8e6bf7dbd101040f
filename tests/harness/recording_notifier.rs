use std::sync::{Arc, Mutex};

use tradeloom::port::Notifier;

/// A message captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub channel: Option<String>,
    pub message: String,
}

/// Thread-safe message collector for notification assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    deliveries: Arc<Mutex<Vec<Delivery>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.deliveries.lock().expect("lock notifier deliveries").len()
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .expect("lock notifier deliveries")
            .clone()
    }

    fn record(&self, channel: Option<&str>, message: &str) {
        self.deliveries
            .lock()
            .expect("lock notifier deliveries")
            .push(Delivery {
                channel: channel.map(str::to_owned),
                message: message.to_owned(),
            });
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.record(None, message);
    }

    fn notify_to(&self, channel: &str, message: &str) {
        self.record(Some(channel), message);
    }
}
