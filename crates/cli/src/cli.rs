use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "filing-watch",
    version,
    about = "Mail new financial disclosure filings to a distribution list"
)]
pub struct Cli {
    /// TOML config file. Environment variables override its values.
    #[arg(short, long, env = "FILING_WATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Search, and if the latest filing is new, mail it and remember it (default)
    Run,
    /// Report the latest filing and whether it is new, without side effects
    Check,
    /// Print the effective configuration with secrets redacted
    ShowConfig,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_run() {
        let cli = Cli::try_parse_from(["filing-watch"]).unwrap();
        assert_eq!(cli.command(), Command::Run);
        assert!(!cli.json_logs);
    }

    #[test]
    fn test_check_with_config() {
        let cli =
            Cli::try_parse_from(["filing-watch", "--config", "/etc/filing-watch.toml", "check"])
                .unwrap();
        assert_eq!(cli.command(), Command::Check);
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("/etc/filing-watch.toml"))
        );
    }

    #[test]
    fn test_show_config_subcommand() {
        let cli = Cli::try_parse_from(["filing-watch", "--json-logs", "show-config"]).unwrap();
        assert_eq!(cli.command(), Command::ShowConfig);
        assert!(cli.json_logs);
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["filing-watch", "serve"]).is_err());
    }
}
