use axum::routing::{get, post};
use axum::Router;

use super::handlers::{add_url, debug_scraper, health, list_sites, overview, remove_url};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(overview))
        .route("/health", get(health))
        .route("/api/sites", get(list_sites))
        .route("/api/urls/add/{url}", get(add_url))
        .route("/api/urls/remove/{url}", get(remove_url))
        .route("/debug/scraper/{domain}", post(debug_scraper))
        .with_state(state)
}
