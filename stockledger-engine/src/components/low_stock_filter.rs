use crate::config::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::filter::Filter;
use crate::types::Product;

/// Keeps unsold products whose quantity is at or below their threshold.
///
/// Products without their own `low_stock_threshold` use `default_threshold`.
pub struct LowStockFilter {
    pub default_threshold: u32,
}

impl Default for LowStockFilter {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl<'a> Filter<&'a Product> for LowStockFilter {
    fn keep(&self, candidate: &&'a Product) -> bool {
        !candidate.is_sold()
            && candidate.quantity <= candidate.effective_threshold(self.default_threshold)
    }
}
