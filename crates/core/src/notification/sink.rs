//! Notification sinks.

use std::sync::Mutex;

use fatura_shared::types::UserId;

use super::event::{BillingEvent, Notification};

/// Receives notifications. Implementations must not block the caller.
pub trait NotificationSink: Send + Sync {
    /// Hands a notification to the sink.
    fn notify(&self, notification: Notification);

    /// Converts `event` and hands it to the sink.
    fn emit(&self, user_id: UserId, event: BillingEvent) {
        self.notify(event.into_notification(user_id));
    }
}

/// Sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notification: Notification) {}
}

/// Sink that keeps notifications in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far.
    #[must_use]
    pub fn received(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|received| received.clone())
            .unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        if let Ok(mut received) = self.received.lock() {
            received.push(notification);
        }
    }
}
