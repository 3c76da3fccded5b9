use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use chrono::Utc;
use stock_core::{status_rows, SiteSnapshot};
use stock_engine::{scrape_html, MonitoredSite};
use stock_logging::stock_info;

use crate::error::Result;
use crate::state::AppState;
use crate::web::page;

pub async fn health() -> &'static str {
    "ok"
}

/// GET /
pub async fn overview(State(state): State<AppState>) -> Html<String> {
    let sites = state.manager.list_all();
    Html(page::overview(&status_rows(&sites)))
}

/// GET /api/sites
pub async fn list_sites(State(state): State<AppState>) -> Json<Vec<SiteSnapshot>> {
    Json(state.manager.list_all())
}

/// GET /api/urls/add/{url}
pub async fn add_url(
    State(state): State<AppState>,
    Path(url): Path<String>,
) -> Result<&'static str> {
    state.manager.start_monitoring(&url)?;
    Ok("URL added")
}

/// GET /api/urls/remove/{url}
pub async fn remove_url(
    State(state): State<AppState>,
    Path(url): Path<String>,
) -> Result<&'static str> {
    state.manager.stop_monitoring(&url)?;
    Ok("URL removed")
}

/// POST /debug/scraper/{domain}
///
/// Runs the domain's scraper over the posted HTML and returns what a worker
/// would have stored. Nothing is added to the cache.
pub async fn debug_scraper(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    body: String,
) -> Result<Json<SiteSnapshot>> {
    let scraper = state.manager.registry().resolve(&domain)?;
    let site = MonitoredSite::new(format!("https://{domain}/debug"));
    let result = scrape_html(scraper.as_ref(), site.url(), &body)?;
    site.record_scrape(&result, Utc::now());
    stock_info!("Debug scrape for {}: {:?}", domain, result);
    Ok(Json(site.snapshot()))
}
