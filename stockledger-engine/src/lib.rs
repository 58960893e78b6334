//! Stockledger engine: derives business metrics from product records.
//!
//! The core is `summarize`, a pure function from a product list and a
//! reference time to a `ProductSummary` (totals, monthly trend, best
//! sellers, low stock, category mix). Loading, configuration and the
//! in-memory store sit around it.

pub mod calculations;
pub mod category_breakdown;
pub mod components;
pub mod config;
pub mod error;
pub mod filter;
pub mod monthly_sales;
pub mod product_loader;
pub mod sales_history;
pub mod selector;
pub mod store;
pub mod summary;
pub mod types;
pub mod util;

pub use calculations::{profit_loss, profit_loss_percentage, profit_loss_status, profit_margin};
pub use category_breakdown::category_breakdown;
pub use components::product_list_filter::{ProductListFilter, StatusFilter};
pub use config::{CategorySet, Currency, EngineConfig, MAX_MONTHS};
pub use error::{ConfigError, LedgerError, LedgerResult, LoadError, StoreError};
pub use monthly_sales::monthly_sales;
pub use product_loader::{load_products_csv, load_products_file, load_products_json};
pub use sales_history::sales_history;
pub use store::{NewProduct, ProductStore, ProductUpdate};
pub use summary::{best_sellers, low_stock_items, summarize, summarize_with, SummaryPipeline};
pub use types::{
    CategoryBreakdown, MonthlySales, Product, ProductRecord, ProductSummary, ProfitLossStatus,
    SaleEntry, SaleStatus,
};
