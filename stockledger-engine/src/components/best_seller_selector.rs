use crate::calculations::profit_loss;
use crate::config::DEFAULT_BEST_SELLERS_LIMIT;
use crate::selector::Selector;
use crate::types::Product;

/// Selects the top K sold products by profit.
pub struct BestSellerSelector {
    pub k: usize,
}

impl Default for BestSellerSelector {
    fn default() -> Self {
        Self {
            k: DEFAULT_BEST_SELLERS_LIMIT,
        }
    }
}

impl<'a> Selector<&'a Product> for BestSellerSelector {
    fn score(&self, candidate: &&'a Product) -> f64 {
        profit_loss(candidate)
    }

    fn size(&self) -> Option<usize> {
        Some(self.k)
    }
}
