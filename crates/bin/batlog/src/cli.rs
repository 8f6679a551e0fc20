//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use batlog_domain::locale::Locale;
use batlog_domain::log_kind::LogKind;

use crate::config::DEFAULT_PATH;

#[derive(Debug, Parser)]
#[command(name = "batlog")]
#[command(about = "Browse battery and arm telemetry logs from the dashboard backend", long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(long, global = true, default_value = DEFAULT_PATH)]
    pub config: PathBuf,
    /// Backend base URL, overriding the configuration.
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Display language (`tr` or `en`).
    #[arg(long, global = true)]
    pub lang: Option<Locale>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show one page of a log
    Show {
        /// `arm`, `battery` or `event`
        kind: LogKind,
        /// Page to show, reached by paging forward from page 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Download a CSV export of a log
    Export {
        /// `arm`, `battery` or `event`
        kind: LogKind,
        /// Output file (defaults to the server-suggested name)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List arms and their battery counts
    Arms,
}

#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub arm: Option<u8>,
    #[arg(long)]
    pub battery: Option<u8>,
    /// Measurement code
    #[arg(long)]
    pub dtype: Option<u16>,
    /// `success`, `warning` or `error`
    #[arg(long)]
    pub status: Option<String>,
    /// Range start, `YYYY-MM-DD`
    #[arg(long)]
    pub from: Option<String>,
    /// Range end, `YYYY-MM-DD`
    #[arg(long)]
    pub to: Option<String>,
    /// Drop the default date window
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub all_dates: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_show_with_filters() {
        let cli = Cli::try_parse_from([
            "batlog", "--lang", "en", "show", "battery", "--page", "3", "--arm", "2", "--from",
            "2026-10-01",
        ])
        .unwrap();

        assert_eq!(cli.lang, Some(Locale::En));
        let Command::Show { kind, page, filters } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(kind, LogKind::Battery);
        assert_eq!(page, 3);
        assert_eq!(filters.arm, Some(2));
        assert_eq!(filters.from.as_deref(), Some("2026-10-01"));
    }

    #[test]
    fn should_reject_all_dates_with_explicit_range() {
        let result = Cli::try_parse_from(["batlog", "show", "event", "--all-dates", "--to", "2026-10-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_unknown_kind() {
        assert!(Cli::try_parse_from(["batlog", "show", "alarms"]).is_err());
    }

    #[test]
    fn should_default_config_path() {
        let cli = Cli::try_parse_from(["batlog", "arms"]).unwrap();
        assert_eq!(cli.config, PathBuf::from(DEFAULT_PATH));
    }
}
