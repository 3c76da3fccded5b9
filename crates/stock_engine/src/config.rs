use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Process-wide monitoring settings, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    pub poll_interval: Duration,
    /// Resolve scrapers and tick as usual, but never render or scrape.
    pub dry_run: bool,
    /// Log every tick and scraped snapshot at info level.
    pub verbose: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            dry_run: false,
            verbose: false,
        }
    }
}
