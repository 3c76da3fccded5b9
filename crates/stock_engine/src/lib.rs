//! Stock engine: per-URL polling workers, scraper dispatch and the site cache.
mod cache;
mod config;
mod manager;
mod notify;
mod registry;
mod render;
mod scrapers;
mod site;
mod worker;

pub use cache::SiteCache;
pub use config::{MonitorConfig, DEFAULT_POLL_INTERVAL};
pub use manager::{MonitorError, MonitorManager};
pub use notify::{ChannelNotifier, FanoutNotifier, LogNotifier, NotificationSink, StockNotification};
pub use registry::{RegistryError, ScraperFactory, ScraperRegistry};
pub use render::{
    decode_page, default_search_paths, ContentRenderer, DecodeError, HttpRenderer, HttpSettings,
    PhantomJsRenderer, RenderError,
};
pub use scrapers::{
    load_rules_file, power_rules, scrape_html, RulesError, ScrapeError, Scraper, SelectorRules,
    SelectorScraper,
};
pub use scraper::Html;
pub use site::MonitoredSite;
pub use stock_core::{ScrapeResult, SiteSnapshot, StockTransition};
pub use worker::{MonitorContext, PollingWorker, TickOutcome};
