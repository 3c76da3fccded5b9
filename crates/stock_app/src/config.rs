use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{Parser, ValueEnum};
use stock_engine::MonitorConfig;
use stock_logging::LogDestination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererKind {
    /// Run page scripts through phantomjs.
    Phantomjs,
    /// Plain HTTP GET, no script execution.
    Http,
}

/// Watches product pages and reports when items come back in stock.
#[derive(Debug, Clone, Parser)]
#[command(name = "stock_watch", version)]
pub struct Cli {
    /// File with one URL per line to start monitoring at boot.
    #[arg(long, env = "STOCK_URLS")]
    pub urls: Option<PathBuf>,

    /// Seconds between polls of each URL.
    #[arg(
        long,
        env = "POLL_INTERVAL",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval: u64,

    #[arg(long, env = "LISTEN_ADDRESS", default_value = "0.0.0.0:8080")]
    pub listen_address: SocketAddr,

    /// Tick without rendering or scraping.
    #[arg(long, env = "DRYRUN", value_parser = BoolishValueParser::new())]
    pub dry_run: bool,

    #[arg(long, env = "VERBOSE", value_parser = BoolishValueParser::new())]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = RendererKind::Phantomjs)]
    pub renderer: RendererKind,

    /// JSON file with extra selector rules, one entry per retailer.
    #[arg(long, env = "STOCK_SCRAPERS")]
    pub scrapers: Option<PathBuf>,

    /// Also write the log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            poll_interval: Duration::from_secs(self.poll_interval),
            dry_run: self.dry_run,
            verbose: self.verbose,
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, RendererKind};
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn defaults_match_the_documented_values() {
        let cli = Cli::try_parse_from(["stock_watch"]).unwrap();
        assert_eq!(cli.poll_interval, 10);
        assert_eq!(cli.listen_address.port(), 8080);
        assert_eq!(cli.renderer, RendererKind::Phantomjs);
        assert_eq!(cli.monitor_config().poll_interval, Duration::from_secs(10));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        assert!(Cli::try_parse_from(["stock_watch", "--poll-interval", "0"]).is_err());
    }

    #[test]
    fn flags_feed_the_monitor_config() {
        let cli = Cli::try_parse_from([
            "stock_watch",
            "--dry-run",
            "--verbose",
            "--renderer",
            "http",
            "--poll-interval",
            "3",
        ])
        .unwrap();
        let config = cli.monitor_config();
        assert!(config.dry_run);
        assert!(config.verbose);
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        assert_eq!(cli.renderer, RendererKind::Http);
    }
}
