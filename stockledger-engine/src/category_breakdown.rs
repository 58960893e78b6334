use crate::config::CategorySet;
use crate::types::{CategoryBreakdown, CategoryCount, Product};

/// Count products per configured category.
///
/// Every bucket of the category set is present, zero counts included.
/// Blank or unrecognized categories are counted under the fallback bucket.
pub fn category_breakdown(products: &[Product], categories: &CategorySet) -> CategoryBreakdown {
    let mut entries: Vec<CategoryCount> = categories
        .buckets()
        .into_iter()
        .map(|name| CategoryCount {
            category: name.to_string(),
            count: 0,
        })
        .collect();

    for product in products {
        let is_fallback = product
            .category
            .trim()
            .eq_ignore_ascii_case(&categories.fallback);
        if !is_fallback && !categories.is_known(&product.category) {
            log::warn!(
                "product id={} has unrecognized category '{}', counting as {}",
                product.id,
                product.category,
                categories.fallback
            );
        }
        let bucket = categories.resolve(&product.category);
        if let Some(entry) = entries.iter_mut().find(|e| e.category == bucket) {
            entry.count += 1;
        }
    }

    CategoryBreakdown::new(entries)
}
