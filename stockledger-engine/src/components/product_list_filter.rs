use std::fmt;
use std::str::FromStr;

use crate::filter::Filter;
use crate::types::Product;

/// Which side of the sale a product listing shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Sold,
    Unsold,
}

impl StatusFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Sold => product.is_sold(),
            StatusFilter::Unsold => !product.is_sold(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "sold" => Ok(StatusFilter::Sold),
            "unsold" => Ok(StatusFilter::Unsold),
            other => Err(format!(
                "unknown status '{}' (expected all, sold or unsold)",
                other
            )),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Sold => write!(f, "sold"),
            StatusFilter::Unsold => write!(f, "unsold"),
        }
    }
}

/// Keeps products matching a sale status whose name contains the search
/// term, ignoring case. An empty term matches every name.
#[derive(Clone, Debug, Default)]
pub struct ProductListFilter {
    status: StatusFilter,
    needle: String,
}

impl ProductListFilter {
    pub fn new(status: StatusFilter, search: &str) -> Self {
        Self {
            status,
            needle: search.to_lowercase(),
        }
    }

    pub fn status(&self) -> StatusFilter {
        self.status
    }

    /// Products that pass, input order preserved.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        self.filter(products.iter().collect())
            .kept
            .into_iter()
            .cloned()
            .collect()
    }
}

impl<'a> Filter<&'a Product> for ProductListFilter {
    fn keep(&self, candidate: &&'a Product) -> bool {
        self.status.matches(candidate) && candidate.name.to_lowercase().contains(&self.needle)
    }
}
