use std::fs;
use std::path::Path;

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use stock_core::ScrapeResult;

use super::{ScrapeError, Scraper};

/// CSS-selector rules describing where a retailer puts its stock status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorRules {
    pub domain: String,
    /// Must match for the page to count as a product page.
    pub container: String,
    /// Evaluated inside `container`; its trimmed text is the status text.
    pub status: String,
    pub product: String,
    /// Read this attribute of the product element instead of its text.
    #[serde(default)]
    pub product_attr: Option<String>,
    /// Status text meaning "not in stock", compared case-insensitively.
    pub out_of_stock: String,
}

/// Rules for power.se product pages.
pub fn power_rules() -> SelectorRules {
    SelectorRules {
        domain: "power.se".to_string(),
        container: ".product-main-card".to_string(),
        status: "pwr-product-stock-label".to_string(),
        product: r#"pwr-product-page meta[itemprop="name"]"#.to_string(),
        product_attr: Some("content".to_string()),
        out_of_stock: "inte i lager".to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed rules file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid selector '{selector}' for {domain}: {message}")]
    InvalidSelector {
        domain: String,
        selector: String,
        message: String,
    },
}

/// Reads a JSON array of [`SelectorRules`], rejecting any entry whose
/// selectors do not compile.
pub fn load_rules_file(path: &Path) -> Result<Vec<SelectorRules>, RulesError> {
    let content = fs::read_to_string(path)?;
    let rules: Vec<SelectorRules> = serde_json::from_str(&content)?;
    for entry in &rules {
        SelectorScraper::new(entry.clone())?;
    }
    Ok(rules)
}

/// [`Scraper`] driven entirely by [`SelectorRules`].
#[derive(Debug, Clone)]
pub struct SelectorScraper {
    rules: SelectorRules,
    container: Selector,
    status: Selector,
    product: Selector,
    out_of_stock: String,
}

impl SelectorScraper {
    pub fn new(rules: SelectorRules) -> Result<Self, RulesError> {
        let container = compile(&rules.domain, &rules.container)?;
        let status = compile(&rules.domain, &rules.status)?;
        let product = compile(&rules.domain, &rules.product)?;
        let out_of_stock = rules.out_of_stock.trim().to_lowercase();
        Ok(Self {
            rules,
            container,
            status,
            product,
            out_of_stock,
        })
    }

    fn product_name(&self, document: &Html) -> String {
        let Some(element) = document.select(&self.product).next() else {
            return String::new();
        };
        let raw = match self.rules.product_attr.as_deref() {
            Some(attr) => element.value().attr(attr).unwrap_or_default().to_string(),
            None => element_text(element),
        };
        raw.trim().to_lowercase()
    }
}

impl Scraper for SelectorScraper {
    fn domain(&self) -> &str {
        &self.rules.domain
    }

    fn scrape(&self, url: &str, document: &Html) -> Result<ScrapeResult, ScrapeError> {
        let container = document
            .select(&self.container)
            .next()
            .ok_or_else(|| ScrapeError::MissingElement {
                selector: self.rules.container.clone(),
                url: url.to_string(),
            })?;

        let status_text = container
            .select(&self.status)
            .next()
            .map(element_text)
            .unwrap_or_default();
        if status_text.is_empty() {
            return Err(ScrapeError::EmptyStatus {
                url: url.to_string(),
            });
        }

        let in_stock = status_text.to_lowercase() != self.out_of_stock;
        Ok(ScrapeResult {
            product: self.product_name(document),
            status_text,
            in_stock,
        })
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn compile(domain: &str, selector: &str) -> Result<Selector, RulesError> {
    Selector::parse(selector).map_err(|err| RulesError::InvalidSelector {
        domain: domain.to_string(),
        selector: selector.to_string(),
        message: err.to_string(),
    })
}
