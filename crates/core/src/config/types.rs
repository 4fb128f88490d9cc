use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub mail: MailConfig,
    pub site: SiteConfig,
    #[serde(default)]
    pub headers: HeadersConfig,
    #[serde(default)]
    pub state: StateConfig,
}

/// Outbound mail configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Sender address, also used as the SMTP login.
    pub sender: String,
    /// SMTP password (usually an app password).
    pub password: String,
    /// Distribution list. Accepts a TOML array or a comma-separated string.
    #[serde(deserialize_with = "deserialize_recipients")]
    pub recipients: Vec<String>,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Display value of the `To` header. Real recipients only go in Bcc.
    #[serde(default = "default_to_display")]
    pub to_display: String,
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_to_display() -> String {
    "Undisclosed Recipients <noreply@example.com>".to_string()
}

pub fn default_subject_prefix() -> String {
    "Financial disclosure".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Monitored site configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Endpoint receiving the search form POST.
    pub search_url: String,
    /// Search page fetched first to obtain the session cookie.
    pub view_search_url: String,
    /// Origin that relative report links are resolved against.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Filer surname sent as `LastName`.
    #[serde(default = "default_last_name")]
    pub last_name: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_origin() -> String {
    "https://disclosures-clerk.house.gov/".to_string()
}

fn default_last_name() -> String {
    "pelosi".to_string()
}

/// Headers sent with every request to the site. Unset headers are omitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HeadersConfig {
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub referer: Option<String>,
    #[serde(default)]
    pub accept_language: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Persisted state configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateConfig {
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn default_state_path() -> PathBuf {
    PathBuf::from("last_report_id")
}

fn deserialize_recipients<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Recipients {
        List(Vec<String>),
        Csv(String),
    }

    let raw = match Recipients::deserialize(deserializer)? {
        Recipients::List(list) => list,
        Recipients::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };

    Ok(raw
        .into_iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect())
}

/// Sanitized config for display (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub mail: SanitizedMailConfig,
    pub site: SiteConfig,
    pub headers: HeadersConfig,
    pub state: StateConfig,
}

/// Sanitized mail config (password hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedMailConfig {
    pub sender: String,
    pub password_configured: bool,
    pub recipients: Vec<String>,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub to_display: String,
    pub subject_prefix: String,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let mail = &config.mail;
        Self {
            mail: SanitizedMailConfig {
                sender: mail.sender.clone(),
                password_configured: !mail.password.is_empty(),
                recipients: mail.recipients.clone(),
                smtp_host: mail.smtp_host.clone(),
                smtp_port: mail.smtp_port,
                to_display: mail.to_display.clone(),
                subject_prefix: mail.subject_prefix.clone(),
                timeout_secs: mail.timeout_secs,
            },
            site: config.site.clone(),
            headers: config.headers.clone(),
            state: config.state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[mail]
sender = "bot@example.com"
password = "hunter2"
recipients = ["a@example.com", "b@example.com"]

[site]
search_url = "https://disclosures-clerk.house.gov/FinancialDisclosure/ViewMemberSearchResult"
view_search_url = "https://disclosures-clerk.house.gov/FinancialDisclosure/ViewSearch"
"#;

    #[test]
    fn test_deserialize_minimal_config_uses_defaults() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.mail.recipients.len(), 2);
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(
            config.mail.to_display,
            "Undisclosed Recipients <noreply@example.com>"
        );
        assert_eq!(config.site.origin, "https://disclosures-clerk.house.gov/");
        assert_eq!(config.site.last_name, "pelosi");
        assert_eq!(config.state.path.to_str().unwrap(), "last_report_id");
        assert!(config.headers.user_agent.is_none());
    }

    #[test]
    fn test_recipients_from_comma_separated_string() {
        let toml = MINIMAL.replace(
            r#"recipients = ["a@example.com", "b@example.com"]"#,
            r#"recipients = "a@example.com, b@example.com,,""#,
        );
        let config: Config = toml::from_str(&toml).unwrap();
        assert_eq!(
            config.mail.recipients,
            vec!["a@example.com".to_string(), "b@example.com".to_string()]
        );
    }

    #[test]
    fn test_deserialize_missing_site_fails() {
        let toml = r#"
[mail]
sender = "bot@example.com"
password = "hunter2"
recipients = "a@example.com"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_hides_password() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.mail.password_configured);

        let rendered = serde_json::to_string(&sanitized).unwrap();
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("bot@example.com"));
    }
}
