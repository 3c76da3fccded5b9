/// How the in-stock flag moved between two observations of the same page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockTransition {
    /// First successful scrape; there is nothing to compare against.
    FirstObservation { in_stock: bool },
    CameInStock,
    WentOutOfStock,
    Unchanged { in_stock: bool },
}

impl StockTransition {
    /// `previous` is `None` when the site had never been scraped.
    pub fn between(previous: Option<bool>, current: bool) -> Self {
        match (previous, current) {
            (None, in_stock) => Self::FirstObservation { in_stock },
            (Some(false), true) => Self::CameInStock,
            (Some(true), false) => Self::WentOutOfStock,
            (Some(_), in_stock) => Self::Unchanged { in_stock },
        }
    }

    /// Edge trigger: the item is in stock now and was not known to be before.
    /// A first scrape that finds stock counts as an edge.
    pub fn should_notify(self) -> bool {
        matches!(
            self,
            Self::CameInStock | Self::FirstObservation { in_stock: true }
        )
    }
}
