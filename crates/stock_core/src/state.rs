use chrono::{DateTime, Utc};
use serde::Serialize;

/// What a scraper extracted from one page render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeResult {
    pub product: String,
    pub status_text: String,
    pub in_stock: bool,
}

/// Mutable part of a monitored site. Callers keep it behind a lock.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteState {
    product: String,
    last_status_text: String,
    in_stock: bool,
    last_scraped_at: Option<DateTime<Utc>>,
}

impl SiteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn last_status_text(&self) -> &str {
        &self.last_status_text
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn last_scraped_at(&self) -> Option<DateTime<Utc>> {
        self.last_scraped_at
    }

    /// `false` until the first successful scrape has been recorded.
    pub fn is_scraped(&self) -> bool {
        self.last_scraped_at.is_some()
    }

    /// Stores a successful scrape and returns the previous in-stock
    /// observation, or `None` if the site had never been scraped.
    ///
    /// An empty product name keeps the one already known.
    pub fn record(&mut self, result: &ScrapeResult, at: DateTime<Utc>) -> Option<bool> {
        let previous = self.is_scraped().then_some(self.in_stock);
        if !result.product.is_empty() {
            self.product.clone_from(&result.product);
        }
        self.last_status_text.clone_from(&result.status_text);
        self.in_stock = result.in_stock;
        self.last_scraped_at = Some(at);
        previous
    }
}

/// Owned copy of a site taken under its lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSnapshot {
    pub url: String,
    pub domain: String,
    pub product: String,
    pub last_status_text: String,
    pub in_stock: bool,
    pub last_scraped_at: Option<DateTime<Utc>>,
}

impl SiteSnapshot {
    pub fn from_state(url: &str, domain: &str, state: &SiteState) -> Self {
        Self {
            url: url.to_string(),
            domain: domain.to_string(),
            product: state.product.clone(),
            last_status_text: state.last_status_text.clone(),
            in_stock: state.in_stock,
            last_scraped_at: state.last_scraped_at,
        }
    }
}
