use stock_engine::{
    power_rules, Html, RegistryError, RulesError, ScrapeError, ScrapeResult, Scraper,
    ScraperRegistry, SelectorRules,
};

struct FixedScraper {
    domain: &'static str,
    product: &'static str,
}

impl Scraper for FixedScraper {
    fn domain(&self) -> &str {
        self.domain
    }

    fn scrape(&self, _url: &str, _document: &Html) -> Result<ScrapeResult, ScrapeError> {
        Ok(ScrapeResult {
            product: self.product.to_string(),
            status_text: "in stock".to_string(),
            in_stock: true,
        })
    }
}

fn fixed(domain: &'static str, product: &'static str) -> impl Fn() -> Box<dyn Scraper> {
    move || -> Box<dyn Scraper> { Box::new(FixedScraper { domain, product }) }
}

#[test]
fn resolve_returns_not_found_for_unknown_domain() {
    let registry = ScraperRegistry::new();
    let err = registry.resolve("shop.example").err().unwrap();
    assert_eq!(err, RegistryError::NotFound("shop.example".into()));
}

#[test]
fn resolve_by_url_strips_www() {
    let mut registry = ScraperRegistry::new();
    registry.register("shop.example", fixed("shop.example", "widget"));

    let scraper = registry
        .resolve_by_url("https://www.shop.example/p/1")
        .expect("scraper");
    assert_eq!(scraper.domain(), "shop.example");
    assert!(registry.resolve_by_url("https://other.example/p/1").is_err());
}

#[test]
fn last_registration_wins() {
    let mut registry = ScraperRegistry::new();
    registry.register("shop.example", fixed("shop.example", "first"));
    registry.register("shop.example", fixed("shop.example", "second"));

    let html = Html::parse_document("<html></html>");
    let result = registry
        .resolve("shop.example")
        .unwrap()
        .scrape("https://shop.example/p1", &html)
        .unwrap();
    assert_eq!(result.product, "second");
    assert_eq!(registry.domains(), vec!["shop.example".to_string()]);
}

#[test]
fn builtin_registry_serves_power() {
    let registry = ScraperRegistry::with_builtin_scrapers().unwrap();
    assert!(registry.contains("power.se"));
    let scraper = registry
        .resolve_by_url("https://www.power.se/gaming/p-1077687/")
        .unwrap();
    assert_eq!(scraper.domain(), "power.se");
}

#[test]
fn rules_with_bad_selectors_are_rejected() {
    let mut registry = ScraperRegistry::new();
    let rules = SelectorRules {
        container: "div[".to_string(),
        ..power_rules()
    };
    let err = registry.register_rules(rules).unwrap_err();
    assert!(matches!(err, RulesError::InvalidSelector { .. }));
    assert!(registry.domains().is_empty());
}
