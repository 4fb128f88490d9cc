use url::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Sender and at least one recipient are set
/// - Site URLs parse as absolute URLs
/// - SMTP port is not 0
/// - Site origin ends with `/`, so relative links keep its path
///
/// Values are otherwise taken as given; a bad address surfaces when the
/// message is built.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.mail.sender.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "mail.sender cannot be empty".to_string(),
        ));
    }

    if config.mail.recipients.is_empty() {
        return Err(ConfigError::ValidationError(
            "mail.recipients must contain at least one address".to_string(),
        ));
    }

    if config.mail.smtp_port == 0 {
        return Err(ConfigError::ValidationError(
            "mail.smtp_port cannot be 0".to_string(),
        ));
    }

    for (name, value) in [
        ("site.search_url", &config.site.search_url),
        ("site.view_search_url", &config.site.view_search_url),
        ("site.origin", &config.site.origin),
    ] {
        Url::parse(value).map_err(|e| {
            ConfigError::ValidationError(format!("{} is not a valid URL ({}): {}", name, value, e))
        })?;
    }

    if !config.site.origin.ends_with('/') {
        return Err(ConfigError::ValidationError(format!(
            "site.origin must end with '/' ({})",
            config.site.origin
        )));
    }

    Ok(())
}
