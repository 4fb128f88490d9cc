//! Message construction.

use lettre::address::{Address, Envelope};
use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::message::{Attachment as MailAttachment, Body, Mailbox, MultiPart};
use lettre::Message;

use crate::config::MailConfig;

use super::{Notification, NotifyError};

const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

fn parse_mailbox(value: &str) -> Result<Mailbox, NotifyError> {
    value.trim().parse().map_err(|source| NotifyError::Address {
        value: value.to_string(),
        source,
    })
}

/// Build the email for a notification.
///
/// `To` carries only the configured placeholder. Recipients are added as
/// `Bcc`, which lettre strips from the rendered headers, and the SMTP
/// envelope is set explicitly to the recipients so the placeholder is never
/// a delivery target.
pub fn build_message(config: &MailConfig, notification: &Notification) -> Result<Message, NotifyError> {
    let from = parse_mailbox(&config.sender)?;
    let to = parse_mailbox(&config.to_display)?;
    let recipients = config
        .recipients
        .iter()
        .map(|r| parse_mailbox(r))
        .collect::<Result<Vec<_>, _>>()?;

    let envelope = Envelope::new(
        Some(from.email.clone()),
        recipients.iter().map(|m| m.email.clone()).collect::<Vec<Address>>(),
    )
    .map_err(|e| NotifyError::Message(e.to_string()))?;

    let mut builder = Message::builder()
        .from(from)
        .to(to)
        .subject(notification.subject.as_str())
        .envelope(envelope);
    for recipient in recipients {
        builder = builder.bcc(recipient);
    }

    let message = match &notification.attachment {
        Some(attachment) => {
            let body =
                Body::new_with_encoding(attachment.content.clone(), ContentTransferEncoding::Base64)
                    .map_err(|_| NotifyError::Message("attachment encoding failed".to_string()))?;
            let content_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE)
                .map_err(|e| NotifyError::Message(e.to_string()))?;
            let part = MailAttachment::new(attachment.filename.clone()).body(body, content_type);
            builder.multipart(MultiPart::mixed().singlepart(part))
        }
        None => builder.body(String::new()),
    };

    message.map_err(|e| NotifyError::Message(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail_config() -> MailConfig {
        MailConfig {
            sender: "bot@example.com".to_string(),
            password: "secret".to_string(),
            recipients: vec![
                "alice@example.com".to_string(),
                "bob@example.org".to_string(),
            ],
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            to_display: "Undisclosed Recipients <noreply@example.com>".to_string(),
            subject_prefix: "Financial disclosure".to_string(),
            timeout_secs: 30,
        }
    }

    fn rendered(message: &Message) -> String {
        String::from_utf8_lossy(&message.formatted()).into_owned()
    }

    #[test]
    fn test_envelope_targets_only_recipients() {
        let notification = Notification::new("Financial disclosure - 123");
        let message = build_message(&mail_config(), &notification).unwrap();

        let to: Vec<String> = message
            .envelope()
            .to()
            .iter()
            .map(|a| a.to_string())
            .collect();
        assert_eq!(to, vec!["alice@example.com", "bob@example.org"]);
        assert_eq!(
            message.envelope().from().map(|a| a.to_string()).as_deref(),
            Some("bot@example.com")
        );
    }

    #[test]
    fn test_recipients_hidden_from_headers() {
        let notification = Notification::new("Financial disclosure - 123");
        let message = build_message(&mail_config(), &notification).unwrap();
        let text = rendered(&message);

        assert!(text.contains("noreply@example.com"));
        assert!(text.contains("Subject: Financial disclosure - 123"));
        assert!(!text.contains("alice@example.com"));
        assert!(!text.contains("bob@example.org"));
    }

    #[test]
    fn test_attachment_is_base64_with_filename() {
        let notification = Notification::new("Financial disclosure - 123")
            .with_attachment("123.pdf", b"%PDF-1.7 minimal".to_vec());
        let message = build_message(&mail_config(), &notification).unwrap();
        let text = rendered(&message);

        assert!(text.contains("multipart/mixed"));
        assert!(text.contains("filename=\"123.pdf\""));
        assert!(text.contains("Content-Transfer-Encoding: base64"));
        assert!(text.contains("application/octet-stream"));
        // base64 of "%PDF-1.7 minimal"
        assert!(text.contains("JVBERi0xLjcgbWluaW1hbA=="));
    }

    #[test]
    fn test_invalid_recipient_is_rejected() {
        let mut config = mail_config();
        config.recipients.push("not an address".to_string());
        let err = build_message(&config, &Notification::new("x")).unwrap_err();
        assert!(matches!(err, NotifyError::Address { ref value, .. } if value == "not an address"));
    }
}
