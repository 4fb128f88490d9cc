pub mod config;
pub mod fetcher;
pub mod http;
pub mod notifier;
pub mod search;
pub mod state;
pub mod testing;
pub mod watcher;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, HeadersConfig,
    MailConfig, SanitizedConfig, SiteConfig, StateConfig,
};
pub use fetcher::{FetchError, FetchOutcome, HttpReportFetcher, ReportFetcher};
pub use http::ClientBuildError;
pub use notifier::{build_message, Attachment, Notification, Notifier, NotifyError, SmtpNotifier};
pub use search::{
    ClerkSearcher, FilingRef, FilingSearcher, ResultOrder, SearchCriteria, SearchError,
    RESULT_ORDER,
};
pub use state::{FileStateStore, StateError, StateStore};
pub use watcher::{CheckReport, FilingWatcher, RunOutcome, WatchError};
