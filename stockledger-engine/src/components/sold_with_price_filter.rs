use crate::filter::Filter;
use crate::types::Product;

/// Keeps sold products that have a recorded sale price.
///
/// A sold record without a price can't be ranked by profit, so it is
/// removed rather than ranked as zero.
pub struct SoldWithPriceFilter;

impl<'a> Filter<&'a Product> for SoldWithPriceFilter {
    fn keep(&self, candidate: &&'a Product) -> bool {
        candidate.sold_price().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleStatus;

    fn product(id: &str, sale: SaleStatus) -> Product {
        Product {
            id: id.into(),
            name: id.into(),
            quantity: 1,
            original_price: 10.0,
            category: "Other".into(),
            sale,
            buyer_info: None,
            low_stock_threshold: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn removes_unsold_and_priceless_sales() {
        let products = vec![
            product("unsold", SaleStatus::Unsold),
            product("sold", SaleStatus::Sold { price: Some(15.0), date: None }),
            product("no-price", SaleStatus::Sold { price: None, date: Some(1) }),
        ];
        let result = SoldWithPriceFilter.filter(products.iter().collect());

        let kept: Vec<&str> = result.kept.iter().map(|p| p.id.as_str()).collect();
        let removed: Vec<&str> = result.removed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(kept, vec!["sold"]);
        assert_eq!(removed, vec!["unsold", "no-price"]);
    }

    #[test]
    fn name_is_short_type_name() {
        assert_eq!(Filter::<&Product>::name(&SoldWithPriceFilter), "SoldWithPriceFilter");
    }
}
