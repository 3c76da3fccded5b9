//! Stock core: pure site state, the stock transition rule and view-model helpers.
mod state;
mod transition;
mod urls;
mod view_model;

pub use state::{ScrapeResult, SiteSnapshot, SiteState};
pub use transition::StockTransition;
pub use urls::{domain_from_url, is_valid_url};
pub use view_model::{status_rows, StatusRowView, NEVER_SCRAPED};
