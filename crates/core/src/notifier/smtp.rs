//! SMTP notifier.

use std::time::Duration;

use async_trait::async_trait;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{debug, info};

use crate::config::MailConfig;

use super::message::build_message;
use super::{Notification, Notifier, NotifyError};

/// Sends notifications through an authenticated STARTTLS relay.
///
/// A transport is opened per send and dropped when the send returns, so
/// each notification is exactly one connection, one login and one message.
pub struct SmtpNotifier {
    config: MailConfig,
}

impl SmtpNotifier {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let message = build_message(&self.config, notification)?;

        info!(
            relay = %self.config.smtp_host,
            recipients = self.config.recipients.len(),
            subject = %notification.subject,
            "Sending email"
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.sender.clone(),
                self.config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(self.config.timeout_secs as u64)))
            .build();

        let response = transport.send(message).await?;
        debug!(code = %response.code(), "Relay accepted message");

        info!("Email sent");
        Ok(())
    }
}
