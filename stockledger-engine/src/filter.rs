use crate::util;

/// Result of a filter operation, partitioning candidates into kept and removed.
pub struct FilterResult<C> {
    pub kept: Vec<C>,
    pub removed: Vec<C>,
}

/// Filters partition candidates into kept and removed sets.
///
/// Input order is preserved within both partitions.
pub trait Filter<C>: Send + Sync
where
    C: Clone,
{
    /// Decide whether a single candidate is kept.
    fn keep(&self, candidate: &C) -> bool;

    /// Filter candidates by evaluating each against `keep`. Kept candidates
    /// continue to the next stage; removed ones are excluded from further
    /// processing.
    fn filter(&self, candidates: Vec<C>) -> FilterResult<C> {
        let (kept, removed): (Vec<C>, Vec<C>) = candidates.into_iter().partition(|c| self.keep(c));
        FilterResult { kept, removed }
    }

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
