use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use stock_app::{build_router, read_url_list, seed_urls, AppState};
use stock_engine::{
    ContentRenderer, LogNotifier, MonitorConfig, MonitorContext, MonitorManager, RenderError,
    ScraperRegistry,
};
use tower::ServiceExt;

const POWER_IN_STOCK: &str = include_str!("../../stock_engine/tests/fixtures/power_in_stock.html");

struct OfflineRenderer;

#[async_trait::async_trait]
impl ContentRenderer for OfflineRenderer {
    async fn render(&self, _url: &str) -> Result<String, RenderError> {
        Err(RenderError::Network("offline".into()))
    }
}

fn manager() -> Arc<MonitorManager> {
    Arc::new(MonitorManager::new(MonitorContext {
        registry: Arc::new(ScraperRegistry::with_builtin_scrapers().unwrap()),
        renderer: Arc::new(OfflineRenderer),
        notifier: Arc::new(LogNotifier),
        config: MonitorConfig {
            poll_interval: Duration::from_secs(3600),
            ..MonitorConfig::default()
        },
    }))
}

fn app(manager: &Arc<MonitorManager>) -> Router {
    build_router(AppState {
        manager: manager.clone(),
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn health_reports_ok() {
    let manager = manager();
    assert_eq!(get(app(&manager), "/health").await, (StatusCode::OK, "ok".to_string()));
}

#[tokio::test]
async fn add_then_remove_a_percent_encoded_url() {
    let manager = manager();

    let (status, body) =
        get(app(&manager), "/api/urls/add/https%3A%2F%2Fwww.power.se%2Fp%2F1").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "URL added"));
    assert_eq!(manager.monitored_urls(), vec!["https://www.power.se/p/1".to_string()]);

    let (status, body) =
        get(app(&manager), "/api/urls/remove/https%3A%2F%2Fwww.power.se%2Fp%2F1").await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "URL removed"));
    assert_eq!(manager.worker_count(), 0);
    assert!(manager.cache().is_empty());
}

#[tokio::test]
async fn duplicate_add_is_a_conflict() {
    let manager = manager();
    manager.start_monitoring("https://www.power.se/p/1").unwrap();

    let (status, body) =
        get(app(&manager), "/api/urls/add/https%3A%2F%2Fwww.power.se%2Fp%2F1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("already being monitored"), "{body}");
    assert_eq!(manager.worker_count(), 1);
}

#[tokio::test]
async fn invalid_url_is_a_bad_request() {
    let manager = manager();
    let (status, _) = get(app(&manager), "/api/urls/add/not-a-url").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(manager.cache().is_empty());
}

#[tokio::test]
async fn removing_an_unknown_url_is_not_found() {
    let manager = manager();
    let (status, body) =
        get(app(&manager), "/api/urls/remove/https%3A%2F%2Fshop.example%2Fp1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body.contains("URL removed"));
}

#[tokio::test]
async fn sites_are_listed_in_url_order() {
    let manager = manager();
    manager.start_monitoring("https://www.power.se/p/b").unwrap();
    manager.start_monitoring("https://www.power.se/p/a").unwrap();

    let (status, body) = get(app(&manager), "/api/sites").await;
    assert_eq!(status, StatusCode::OK);
    let sites: serde_json::Value = serde_json::from_str(&body).unwrap();
    let urls: Vec<&str> = sites
        .as_array()
        .unwrap()
        .iter()
        .map(|site| site["url"].as_str().unwrap())
        .collect();
    assert_eq!(urls, vec!["https://www.power.se/p/a", "https://www.power.se/p/b"]);
    assert_eq!(sites[0]["domain"], "power.se");
    assert_eq!(sites[0]["inStock"], false);
    assert!(sites[0]["lastScrapedAt"].is_null());
}

#[tokio::test]
async fn overview_escapes_urls() {
    let manager = manager();
    manager.start_monitoring("https://shop.example/?q=<b>").unwrap();

    let (status, body) = get(app(&manager), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Status of scraped websites"));
    assert!(body.contains("q=&lt;b&gt;</a>"), "{body}");
    assert!(body.contains("<td>never</td>"));
    assert!(body.contains("Tomato"));
}

#[tokio::test]
async fn debug_scraper_runs_the_domain_rules() {
    let manager = manager();
    let request = Request::post("/debug/scraper/power.se")
        .body(Body::from(POWER_IN_STOCK))
        .unwrap();
    let (status, body) = send(app(&manager), request).await;
    assert_eq!(status, StatusCode::OK);

    let snapshot: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(snapshot["product"], "playstation 5 digital edition");
    assert_eq!(snapshot["lastStatusText"], "I lager");
    assert_eq!(snapshot["inStock"], true);
    assert!(manager.cache().is_empty());
}

#[tokio::test]
async fn debug_scraper_for_unknown_domain_is_not_found() {
    let manager = manager();
    let request = Request::post("/debug/scraper/shop.example")
        .body(Body::from("<html></html>"))
        .unwrap();
    let (status, _) = send(app(&manager), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn debug_scraper_rejects_unmatched_markup() {
    let manager = manager();
    let request = Request::post("/debug/scraper/power.se")
        .body(Body::from("<html><body><p>maintenance</p></body></html>"))
        .unwrap();
    let (status, body) = send(app(&manager), request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains(".product-main-card"), "{body}");
}

#[tokio::test]
async fn url_list_skips_comments_and_blank_lines() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# power").unwrap();
    writeln!(file, "https://www.power.se/p/1").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "  https://www.power.se/p/2  ").unwrap();
    writeln!(file, "not a url").unwrap();

    let urls = read_url_list(file.path()).unwrap();
    assert_eq!(
        urls,
        vec![
            "https://www.power.se/p/1".to_string(),
            "https://www.power.se/p/2".to_string(),
            "not a url".to_string(),
        ]
    );

    let manager = manager();
    assert_eq!(seed_urls(&manager, &urls), 2);
    assert_eq!(manager.worker_count(), 2);
}
