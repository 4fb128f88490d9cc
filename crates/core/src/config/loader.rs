use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Plain environment keys and the config paths they map onto.
const ENV_KEYS: &[(&str, &str)] = &[
    ("EMAIL", "mail.sender"),
    ("EMAIL_PASSWORD", "mail.password"),
    ("RECIPIENT_EMAIL", "mail.recipients"),
    ("SEARCH_URL", "site.search_url"),
    ("VIEW_SEARCH_URL", "site.view_search_url"),
    ("LAST_REPORT_ID_FILE", "state.path"),
    ("HEADERS_USER_AGENT", "headers.user_agent"),
    ("HEADERS_REFERER", "headers.referer"),
    ("HEADERS_ACCEPT_LANGUAGE", "headers.accept_language"),
    ("HEADERS_CONTENT_TYPE", "headers.content_type"),
];

/// Load configuration from an optional TOML file with environment overrides.
///
/// Precedence (lowest first): the file, the plain keys in [`ENV_KEYS`],
/// then `FILING_WATCH_<SECTION>__<FIELD>` variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    figment = merge_plain_env(figment);

    figment
        .merge(Env::prefixed("FILING_WATCH_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Merge the plain keys as strings. `Env` as a provider would parse values
/// like `12345678` or `[abc]` into numbers and arrays first.
fn merge_plain_env(mut figment: Figment) -> Figment {
    let names: Vec<&str> = ENV_KEYS.iter().map(|(name, _)| *name).collect();
    for (key, value) in Env::raw().only(&names).iter() {
        let path = ENV_KEYS
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, path)| *path);
        if let Some(path) = path {
            figment = figment.merge(Serialized::default(path, value));
        }
    }
    figment
}
