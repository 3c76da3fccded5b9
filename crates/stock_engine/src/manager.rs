use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use stock_core::{is_valid_url, SiteSnapshot};
use stock_logging::{stock_info, stock_warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::worker::{MonitorContext, PollingWorker};
use crate::{MonitoredSite, ScraperRegistry, SiteCache};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonitorError {
    #[error("'{0}' is not a valid URL")]
    InvalidUrl(String),
    #[error("cannot start scraping URL '{0}': it is already being monitored")]
    AlreadyMonitored(String),
    #[error("cannot stop scraping URL '{0}': it is not being monitored")]
    NotMonitored(String),
    #[error("no tokio runtime available to run the worker")]
    RuntimeUnavailable,
}

struct WorkerHandle {
    id: u64,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Owns one polling task per monitored URL.
///
/// The worker table lock is held across the whole start and stop sequences,
/// so the set of URLs with a worker always equals the cache's key set when
/// observed from outside. Lock order is workers, then cache.
pub struct MonitorManager {
    ctx: MonitorContext,
    cache: Arc<SiteCache>,
    workers: Mutex<HashMap<String, WorkerHandle>>,
    next_id: AtomicU64,
}

impl MonitorManager {
    pub fn new(ctx: MonitorContext) -> Self {
        Self {
            ctx,
            cache: Arc::new(SiteCache::new()),
            workers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    pub fn cache(&self) -> &Arc<SiteCache> {
        &self.cache
    }

    pub fn registry(&self) -> &Arc<ScraperRegistry> {
        &self.ctx.registry
    }

    /// Starts a worker for `url`. Returns once the task is spawned; its first
    /// tick comes one poll interval later.
    pub fn start_monitoring(&self, url: &str) -> Result<(), MonitorError> {
        if !is_valid_url(url) {
            return Err(MonitorError::InvalidUrl(url.to_string()));
        }
        let runtime = Handle::try_current().map_err(|_| MonitorError::RuntimeUnavailable)?;

        let mut workers = self.workers();
        if workers.contains_key(url) {
            return Err(MonitorError::AlreadyMonitored(url.to_string()));
        }

        let site = Arc::new(MonitoredSite::new(url));
        self.cache.upsert(site.clone());

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let cancel = CancellationToken::new();
        let worker = PollingWorker::new(id, site, self.ctx.clone());
        let task = runtime.spawn(worker.run(cancel.clone()));
        workers.insert(url.to_string(), WorkerHandle { id, cancel, task });

        stock_info!("[{}] Started monitoring URL '{}'", id, url);
        Ok(())
    }

    /// Tells the worker for `url` to stop and forgets it. Does not wait for
    /// the task to exit.
    pub fn stop_monitoring(&self, url: &str) -> Result<(), MonitorError> {
        let mut workers = self.workers();
        let handle = workers
            .remove(url)
            .ok_or_else(|| MonitorError::NotMonitored(url.to_string()))?;
        handle.cancel.cancel();
        self.cache.remove(url);
        stock_info!("[{}] Stopping monitoring of URL '{}'", handle.id, url);
        Ok(())
    }

    /// Stops every worker, empties the cache and waits for the tasks to exit.
    pub async fn shutdown(&self) {
        let handles: Vec<WorkerHandle> = {
            let mut workers = self.workers();
            self.cache.clear();
            workers.drain().map(|(_, handle)| handle).collect()
        };
        for handle in &handles {
            handle.cancel.cancel();
        }
        for handle in handles {
            if let Err(err) = handle.task.await {
                stock_warn!("[{}] Worker ended abnormally: {}", handle.id, err);
            }
        }
    }

    pub fn is_monitored(&self, url: &str) -> bool {
        self.workers().contains_key(url)
    }

    /// URLs with a live worker, sorted.
    pub fn monitored_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self.workers().keys().cloned().collect();
        urls.sort();
        urls
    }

    pub fn worker_count(&self) -> usize {
        self.workers().len()
    }

    /// Snapshots of every monitored site, ordered by URL.
    pub fn list_all(&self) -> Vec<SiteSnapshot> {
        self.cache.snapshots()
    }

    fn workers(&self) -> MutexGuard<'_, HashMap<String, WorkerHandle>> {
        self.workers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for MonitorManager {
    fn drop(&mut self) {
        for handle in self.workers().values() {
            handle.cancel.cancel();
        }
    }
}
