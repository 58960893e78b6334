use crate::calculations::profit_loss;
use crate::types::{Product, SaleEntry};

/// Flatten closed sales into history entries, newest sale first.
///
/// Only sold products with both a price and a date produce an entry. Equal
/// dates keep input order.
pub fn sales_history(products: &[Product]) -> Vec<SaleEntry> {
    let mut entries: Vec<SaleEntry> = products
        .iter()
        .filter_map(|p| {
            let sold_price = p.sold_price()?;
            let sold_date = p.sold_date()?;
            Some(SaleEntry {
                product_id: p.id.clone(),
                product_name: p.name.clone(),
                sold_date,
                sold_price,
                original_price: p.original_price,
                profit: profit_loss(p),
                buyer_info: p.buyer_info.clone(),
            })
        })
        .collect();
    entries.sort_by(|a, b| b.sold_date.cmp(&a.sold_date));
    entries
}
