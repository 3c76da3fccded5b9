use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use stock_core::StockTransition;
use stock_logging::{stock_debug, stock_info, stock_warn};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::notify::{NotificationSink, StockNotification};
use crate::render::ContentRenderer;
use crate::scrapers::{scrape_html, Scraper};
use crate::{MonitorConfig, MonitoredSite, ScraperRegistry};

/// `tokio::time::interval` rejects a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Collaborators shared by every worker of one manager.
#[derive(Clone)]
pub struct MonitorContext {
    pub registry: Arc<ScraperRegistry>,
    pub renderer: Arc<dyn ContentRenderer>,
    pub notifier: Arc<dyn NotificationSink>,
    pub config: MonitorConfig,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    NoScraper,
    DryRun,
    RenderFailed,
    ParseFailed,
    ScrapeFailed,
    Updated {
        transition: StockTransition,
        notified: bool,
    },
}

/// Polls one site until cancelled.
pub struct PollingWorker {
    id: u64,
    site: Arc<MonitoredSite>,
    ctx: MonitorContext,
}

impl PollingWorker {
    pub fn new(id: u64, site: Arc<MonitoredSite>, ctx: MonitorContext) -> Self {
        Self { id, site, ctx }
    }

    pub fn site(&self) -> &Arc<MonitoredSite> {
        &self.site
    }

    /// Ticks every poll interval, first one interval after start, until
    /// `cancel` fires. Cancellation is only observed between ticks.
    pub async fn run(self, cancel: CancellationToken) {
        let period = self.ctx.config.poll_interval.max(MIN_POLL_INTERVAL);
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    stock_info!(
                        "[{}] Requested to stop monitoring URL '{}'",
                        self.id,
                        self.site.url()
                    );
                    return;
                }
                _ = ticker.tick() => {
                    let outcome = self.tick().await;
                    stock_debug!(
                        "[{}] Tick for '{}' ended with {:?}",
                        self.id,
                        self.site.url(),
                        outcome
                    );
                }
            }
        }
    }

    /// One poll: resolve, render, scrape, record, notify.
    pub async fn tick(&self) -> TickOutcome {
        let url = self.site.url();
        if self.ctx.config.verbose {
            stock_info!("[{}] Processing URL={}", self.id, url);
        }

        let scraper = match self.ctx.registry.resolve_by_url(url) {
            Ok(scraper) => scraper,
            Err(err) => {
                stock_warn!("[{}] {}", self.id, err);
                return TickOutcome::NoScraper;
            }
        };

        if self.ctx.config.dry_run {
            return TickOutcome::DryRun;
        }

        let html = match self.ctx.renderer.render(url).await {
            Ok(html) => html,
            Err(err) => {
                stock_warn!("[{}] Failed to render url '{}'. {}", self.id, url, err);
                return TickOutcome::RenderFailed;
            }
        };

        self.apply(scraper.as_ref(), &html)
    }

    fn apply(&self, scraper: &dyn Scraper, html: &str) -> TickOutcome {
        let url = self.site.url();
        let result = match scrape_html(scraper, url, html) {
            Ok(result) => result,
            Err(err) if err.is_parse_failure() => {
                stock_warn!("[{}] Failed to parse url '{}'. {}", self.id, url, err);
                return TickOutcome::ParseFailed;
            }
            Err(err) => {
                stock_warn!("[{}] Failed to scrape url '{}'. {}", self.id, url, err);
                return TickOutcome::ScrapeFailed;
            }
        };

        let transition = self.site.record_scrape(&result, Utc::now());
        let notified = transition.should_notify();
        if notified {
            self.ctx.notifier.notify(&StockNotification {
                url: url.to_string(),
                domain: self.site.domain().to_string(),
                product: self.site.product(),
            });
        }

        if self.ctx.config.verbose {
            match serde_json::to_string(&self.site.snapshot()) {
                Ok(json) => stock_info!("[{}] Scraped: {}", self.id, json),
                Err(err) => stock_warn!("[{}] Could not serialize snapshot: {}", self.id, err),
            }
        }

        TickOutcome::Updated {
            transition,
            notified,
        }
    }
}
