use crate::config::DEFAULT_LOW_STOCK_LIMIT;
use crate::selector::Selector;
use crate::types::Product;

/// Selects the K lowest-quantity products.
///
/// Scores are negated quantities, so the descending sort yields ascending
/// stock levels.
pub struct LowStockSelector {
    pub k: usize,
}

impl Default for LowStockSelector {
    fn default() -> Self {
        Self {
            k: DEFAULT_LOW_STOCK_LIMIT,
        }
    }
}

impl<'a> Selector<&'a Product> for LowStockSelector {
    fn score(&self, candidate: &&'a Product) -> f64 {
        -(candidate.quantity as f64)
    }

    fn size(&self) -> Option<usize> {
        Some(self.k)
    }
}
