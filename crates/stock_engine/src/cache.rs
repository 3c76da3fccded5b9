use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use stock_core::SiteSnapshot;

use crate::MonitoredSite;

/// URL -> site map. The lock covers the mapping only; a site's fields are
/// guarded by that site's own lock.
#[derive(Debug, Default)]
pub struct SiteCache {
    sites: Mutex<BTreeMap<String, Arc<MonitoredSite>>>,
}

impl SiteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the entry keyed by the site's URL, returning the
    /// replaced entry.
    pub fn upsert(&self, site: Arc<MonitoredSite>) -> Option<Arc<MonitoredSite>> {
        self.sites().insert(site.url().to_string(), site)
    }

    pub fn get(&self, url: &str) -> Option<Arc<MonitoredSite>> {
        self.sites().get(url).cloned()
    }

    pub fn remove(&self, url: &str) -> Option<Arc<MonitoredSite>> {
        self.sites().remove(url)
    }

    /// Every entry, ordered by URL.
    pub fn list_all(&self) -> Vec<Arc<MonitoredSite>> {
        self.sites().values().cloned().collect()
    }

    /// Field snapshots of [`Self::list_all`]. The cache lock is released
    /// before any site lock is taken.
    pub fn snapshots(&self) -> Vec<SiteSnapshot> {
        self.list_all().iter().map(|site| site.snapshot()).collect()
    }

    pub fn len(&self) -> usize {
        self.sites().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites().is_empty()
    }

    pub(crate) fn clear(&self) {
        self.sites().clear();
    }

    fn sites(&self) -> MutexGuard<'_, BTreeMap<String, Arc<MonitoredSite>>> {
        self.sites.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
