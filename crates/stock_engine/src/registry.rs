use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use stock_core::domain_from_url;

use crate::scrapers::{power_rules, RulesError, Scraper, SelectorRules, SelectorScraper};

/// Produces a fresh scraper each time it is called.
pub type ScraperFactory = Arc<dyn Fn() -> Box<dyn Scraper> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no scraper registered for domain '{0}'")]
    NotFound(String),
}

/// Domain -> scraper factory map.
///
/// Registration takes `&mut self`, so it only happens before the registry is
/// shared behind an `Arc`; lookups afterwards need no lock.
#[derive(Clone, Default)]
pub struct ScraperRegistry {
    factories: HashMap<String, ScraperFactory>,
}

impl ScraperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the scrapers that ship with the binary.
    pub fn with_builtin_scrapers() -> Result<Self, RulesError> {
        let mut registry = Self::new();
        registry.register_rules(power_rules())?;
        Ok(registry)
    }

    /// Last registration for a domain wins.
    pub fn register<F>(&mut self, domain: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Scraper> + Send + Sync + 'static,
    {
        self.factories.insert(domain.into(), Arc::new(factory));
    }

    /// Compiles `rules` once and registers a factory cloning the result.
    pub fn register_rules(&mut self, rules: SelectorRules) -> Result<(), RulesError> {
        let domain = rules.domain.clone();
        let compiled = SelectorScraper::new(rules)?;
        self.register(domain, move || -> Box<dyn Scraper> { Box::new(compiled.clone()) });
        Ok(())
    }

    pub fn resolve(&self, domain: &str) -> Result<Box<dyn Scraper>, RegistryError> {
        self.factories
            .get(domain)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::NotFound(domain.to_string()))
    }

    pub fn resolve_by_url(&self, url: &str) -> Result<Box<dyn Scraper>, RegistryError> {
        self.resolve(&domain_from_url(url))
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.factories.contains_key(domain)
    }

    /// Registered domains, sorted.
    pub fn domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = self.factories.keys().cloned().collect();
        domains.sort();
        domains
    }
}

impl fmt::Debug for ScraperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScraperRegistry")
            .field("domains", &self.domains())
            .finish()
    }
}
