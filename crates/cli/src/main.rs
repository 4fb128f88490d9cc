mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use filing_watch_core::{
    load_config, validate_config, ClerkSearcher, Config, FileStateStore, FilingWatcher,
    HttpReportFetcher, RunOutcome, SanitizedConfig, SearchCriteria, SmtpNotifier,
};

use cli::{Cli, Command};

/// Exit code for configuration and startup failures
const EXIT_STARTUP: i32 = 1;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    let code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            EXIT_STARTUP
        }
    };

    std::process::exit(code);
}

fn init_logging(json: bool) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
    );

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Returns the process exit code. `Err` is reserved for startup failures.
async fn run(cli: &Cli) -> Result<i32> {
    match &cli.config {
        Some(path) => info!("Loading configuration from {:?}", path),
        None => info!("Loading configuration from environment"),
    }
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    if cli.command() == Command::ShowConfig {
        let sanitized = SanitizedConfig::from(&config);
        println!("{}", serde_json::to_string_pretty(&sanitized)?);
        return Ok(0);
    }

    validate_config(&config).context("Configuration validation failed")?;
    info!("State file: {:?}", config.state.path);

    let watcher = build_watcher(&config)?;
    let criteria = SearchCriteria::current_year(config.site.last_name.as_str());

    match cli.command() {
        Command::Check => match watcher.check(&criteria).await {
            Ok(report) => {
                let last_seen = report.last_seen.as_deref().unwrap_or("-");
                match &report.latest {
                    Some(filing) => println!(
                        "latest: {} {}\nlast seen: {}\nnew: {}",
                        filing.id, filing.url, last_seen, report.is_new
                    ),
                    None => println!("latest: -\nlast seen: {}\nnew: false", last_seen),
                }
                Ok(0)
            }
            Err(e) => {
                error!("{}", e);
                Ok(e.exit_code())
            }
        },
        _ => match watcher.run_once(&criteria).await {
            Ok(outcome) => {
                log_outcome(&outcome);
                Ok(0)
            }
            Err(e) => {
                error!("Run aborted, last filing id left unchanged: {}", e);
                Ok(e.exit_code())
            }
        },
    }
}

fn build_watcher(config: &Config) -> Result<FilingWatcher> {
    let searcher = ClerkSearcher::new(config.site.clone(), config.headers.clone());
    let fetcher = HttpReportFetcher::new(&config.site, &config.headers)
        .context("Failed to create report fetcher")?;
    let notifier = SmtpNotifier::new(config.mail.clone());
    let state = FileStateStore::new(config.state.path.clone());

    Ok(FilingWatcher::new(
        Arc::new(searcher),
        Arc::new(fetcher),
        Arc::new(notifier),
        Arc::new(state),
    )
    .with_subject_prefix(config.mail.subject_prefix.as_str()))
}

fn log_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::NoResults => info!("Done: no filings listed"),
        RunOutcome::AlreadySeen { id } => info!("Done: {} already delivered", id),
        RunOutcome::NotPdf { id, content_type } => {
            warn!("Done: {} skipped, served as {:?}", id, content_type)
        }
        RunOutcome::Delivered {
            id,
            state_saved: true,
        } => info!("Done: {} delivered", id),
        RunOutcome::Delivered {
            id,
            state_saved: false,
        } => warn!("Done: {} delivered but not recorded, next run may resend", id),
    }
}
