//! HTTP front end and process wiring for the stock watcher.
pub mod config;
pub mod error;
pub mod startup;
pub mod state;
pub mod web;

pub use config::{Cli, RendererKind};
pub use error::AppError;
pub use startup::{build_manager, build_registry, read_url_list, run, seed_urls};
pub use state::AppState;
pub use web::build_router;
