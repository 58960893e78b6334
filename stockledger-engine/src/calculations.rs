//! Per-record profit arithmetic.
//!
//! None of these functions fail. Missing sale data counts as zero and
//! percentage math returns 0 instead of dividing by a zero cost.

use crate::types::{Product, ProfitLossStatus};

/// Profit or loss on a single record.
///
/// Returns 0 if the product is unsold or the sale price was never recorded.
pub fn profit_loss(product: &Product) -> f64 {
    match product.sold_price() {
        Some(price) => price - product.original_price,
        None => 0.0,
    }
}

/// Profit or loss as a percentage of the acquisition cost.
///
/// Returns 0 when unsold, when the sale price is missing, or when
/// `original_price` is 0.
pub fn profit_loss_percentage(product: &Product) -> f64 {
    match product.sold_price() {
        Some(price) if product.original_price != 0.0 => {
            (price - product.original_price) / product.original_price * 100.0
        }
        _ => 0.0,
    }
}

pub fn profit_loss_status(amount: f64) -> ProfitLossStatus {
    if amount > 0.0 {
        ProfitLossStatus::Gain
    } else if amount < 0.0 {
        ProfitLossStatus::Loss
    } else {
        ProfitLossStatus::Even
    }
}

/// Revenue booked by a sold record: its sale price, or 0 if missing.
///
/// Quantity does not scale revenue; the sale price covers the whole lot.
pub fn realized_revenue(product: &Product) -> f64 {
    product.sold_price().unwrap_or(0.0)
}

/// Realized margin of a sold record: revenue minus acquisition cost.
///
/// Unlike [`profit_loss`], a sold record with no recorded price still books
/// its cost, so that summed margins equal summed revenue minus summed cost.
pub fn realized_margin(product: &Product) -> f64 {
    realized_revenue(product) - product.original_price
}

/// Total profit as a percentage of total revenue.
///
/// Returns 0 when there is no positive revenue to measure against.
pub fn profit_margin(total_profit: f64, total_revenue: f64) -> f64 {
    if total_revenue > 0.0 {
        total_profit / total_revenue * 100.0
    } else {
        0.0
    }
}
