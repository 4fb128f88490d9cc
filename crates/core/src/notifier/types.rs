//! Types for notifications.

use async_trait::async_trait;
use thiserror::Error;

/// A file attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
}

/// A message to deliver to the distribution list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub attachment: Option<Attachment>,
}

impl Notification {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, filename: impl Into<String>, content: Vec<u8>) -> Self {
        self.attachment = Some(Attachment {
            filename: filename.into(),
            content,
        });
        self
    }
}

/// Errors that can occur while sending a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid mail address {value:?}: {source}")]
    Address {
        value: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("Failed to build message: {0}")]
    Message(String),

    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Trait for notification channels.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name for logging.
    fn name(&self) -> &str;

    /// Deliver the notification. Errors are returned, never swallowed.
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}
