use scraper::Html;
use stock_core::ScrapeResult;

mod selector;

pub use selector::{load_rules_file, power_rules, RulesError, SelectorRules, SelectorScraper};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    #[error("rendered document for '{url}' is empty")]
    EmptyDocument { url: String },
    #[error("could not find '{selector}' on '{url}'")]
    MissingElement { selector: String, url: String },
    #[error("failed to scrape status text from '{url}'")]
    EmptyStatus { url: String },
}

impl ScrapeError {
    /// The page could not be turned into a document at all, as opposed to
    /// markup that did not match a scraper's rules.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, ScrapeError::EmptyDocument { .. })
    }
}

/// Extracts product and stock information from one retailer's markup.
pub trait Scraper: Send + Sync {
    /// Domain this scraper serves, without any `www.` prefix.
    fn domain(&self) -> &str;

    fn scrape(&self, url: &str, document: &Html) -> Result<ScrapeResult, ScrapeError>;
}

/// Parse `html` and run `scraper` over it.
///
/// Blank renderer output is rejected as [`ScrapeError::EmptyDocument`];
/// html5ever accepts anything else.
pub fn scrape_html(
    scraper: &dyn Scraper,
    url: &str,
    html: &str,
) -> Result<ScrapeResult, ScrapeError> {
    if html.trim().is_empty() {
        return Err(ScrapeError::EmptyDocument {
            url: url.to_string(),
        });
    }
    let document = Html::parse_document(html);
    scraper.scrape(url, &document)
}
