//! Mock notifier for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::notifier::{Notification, Notifier, NotifyError};

/// Mock implementation of the Notifier trait.
///
/// Records delivered notifications. A failed send is not recorded.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    sent: Arc<RwLock<Vec<Notification>>>,
    next_error: Arc<RwLock<Option<NotifyError>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the next send to fail with the given error.
    pub async fn set_next_error(&self, error: NotifyError) {
        *self.next_error.write().await = Some(error);
    }

    /// Notifications delivered so far.
    pub async fn sent(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.sent.write().await.push(notification.clone());
        Ok(())
    }
}
