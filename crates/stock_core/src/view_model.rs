use crate::SiteSnapshot;

pub const NEVER_SCRAPED: &str = "never";

/// One row of the status overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRowView {
    pub domain: String,
    pub url: String,
    pub product: String,
    pub last_scraped: String,
    pub in_stock: bool,
}

/// Rows in the order the snapshots were given (callers pass them sorted by URL).
pub fn status_rows(sites: &[SiteSnapshot]) -> Vec<StatusRowView> {
    sites
        .iter()
        .map(|site| StatusRowView {
            domain: site.domain.clone(),
            url: site.url.clone(),
            product: site.product.clone(),
            last_scraped: site
                .last_scraped_at
                .map(|at| at.to_rfc2822())
                .unwrap_or_else(|| NEVER_SCRAPED.to_string()),
            in_stock: site.in_stock,
        })
        .collect()
}
