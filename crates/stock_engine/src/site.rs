use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use stock_core::{domain_from_url, ScrapeResult, SiteSnapshot, SiteState, StockTransition};

/// One monitored page. The URL and domain never change; everything else
/// lives behind the site's own lock.
#[derive(Debug)]
pub struct MonitoredSite {
    url: String,
    domain: String,
    state: Mutex<SiteState>,
}

impl MonitoredSite {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let domain = domain_from_url(&url);
        Self {
            url,
            domain,
            state: Mutex::new(SiteState::new()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn product(&self) -> String {
        self.state().product().to_string()
    }

    pub fn in_stock(&self) -> bool {
        self.state().in_stock()
    }

    pub fn is_scraped(&self) -> bool {
        self.state().is_scraped()
    }

    pub fn snapshot(&self) -> SiteSnapshot {
        SiteSnapshot::from_state(&self.url, &self.domain, &self.state())
    }

    /// Stores a successful scrape and reports how the stock flag moved.
    /// Reading the old flag and writing the new one share one lock acquisition.
    pub fn record_scrape(&self, result: &ScrapeResult, at: DateTime<Utc>) -> StockTransition {
        let previous = self.state().record(result, at);
        StockTransition::between(previous, result.in_stock)
    }

    fn state(&self) -> MutexGuard<'_, SiteState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
