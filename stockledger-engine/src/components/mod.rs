pub mod best_seller_selector;
pub mod low_stock_filter;
pub mod low_stock_selector;
pub mod product_list_filter;
pub mod sold_with_price_filter;
