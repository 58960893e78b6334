use chrono::{DateTime, TimeZone};

use crate::calculations::{profit_margin, realized_margin, realized_revenue};
use crate::category_breakdown::category_breakdown;
use crate::components::best_seller_selector::BestSellerSelector;
use crate::components::low_stock_filter::LowStockFilter;
use crate::components::low_stock_selector::LowStockSelector;
use crate::components::sold_with_price_filter::SoldWithPriceFilter;
use crate::config::{CategorySet, EngineConfig};
use crate::filter::Filter;
use crate::monthly_sales::monthly_sales;
use crate::selector::Selector;
use crate::types::{Product, ProductSummary};

/// The business summary pipeline.
///
/// Each ranked list is a filter stage followed by a selector stage:
/// 1. SoldWithPriceFilter + BestSellerSelector pick the top sellers by profit
/// 2. LowStockFilter + LowStockSelector pick the emptiest shelves
///
/// Scalar totals, monthly buckets and the category breakdown are computed
/// alongside. The pipeline owns no product state; every `run` starts over.
pub struct SummaryPipeline {
    categories: CategorySet,
    months: u32,
    best_seller_filter: SoldWithPriceFilter,
    best_seller_selector: BestSellerSelector,
    low_stock_filter: LowStockFilter,
    low_stock_selector: LowStockSelector,
}

impl Default for SummaryPipeline {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl SummaryPipeline {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            categories: config.categories.clone(),
            months: config.months,
            best_seller_filter: SoldWithPriceFilter,
            best_seller_selector: BestSellerSelector {
                k: config.best_sellers_limit,
            },
            low_stock_filter: LowStockFilter {
                default_threshold: config.default_low_stock_threshold,
            },
            low_stock_selector: LowStockSelector {
                k: config.low_stock_limit,
            },
        }
    }

    /// Sold products with a recorded price, highest profit first.
    pub fn best_sellers(&self, products: &[Product]) -> Vec<Product> {
        filter_and_select(&self.best_seller_filter, &self.best_seller_selector, products)
    }

    /// Unsold products at or below their stock threshold, lowest quantity first.
    pub fn low_stock_items(&self, products: &[Product]) -> Vec<Product> {
        filter_and_select(&self.low_stock_filter, &self.low_stock_selector, products)
    }

    pub fn run<Tz: TimeZone>(&self, products: &[Product], now: &DateTime<Tz>) -> ProductSummary {
        let total_products = products.len();
        let sold: Vec<&Product> = products.iter().filter(|p| p.is_sold()).collect();

        for p in sold.iter().filter(|p| p.sold_price().is_none()) {
            log::warn!("product id={} is sold but has no sale price, counting revenue as 0", p.id);
        }

        let total_investment: f64 = products.iter().map(Product::investment).sum();
        let total_revenue: f64 = sold.iter().map(|p| realized_revenue(p)).sum();
        let total_profit: f64 = sold.iter().map(|p| realized_margin(p)).sum();
        let average_price = if total_products > 0 {
            total_investment / total_products as f64
        } else {
            0.0
        };

        let best_sellers = self.best_sellers(products);
        let low_stock_items = self.low_stock_items(products);

        let summary = ProductSummary {
            total_products,
            sold_products: sold.len(),
            unsold_products: total_products - sold.len(),
            total_investment,
            total_revenue,
            total_profit,
            average_price,
            profit_margin: profit_margin(total_profit, total_revenue),
            monthly_sales: monthly_sales(products, now, self.months),
            low_stock_count: low_stock_items.len(),
            best_sellers,
            low_stock_items,
            category_breakdown: category_breakdown(products, &self.categories),
        };

        log::debug!(
            "summarized {} products: {} sold, revenue={:.2}, profit={:.2}, {} low stock",
            summary.total_products,
            summary.sold_products,
            summary.total_revenue,
            summary.total_profit,
            summary.low_stock_count
        );

        summary
    }
}

fn filter_and_select<'a, F, S>(filter: &F, selector: &S, products: &'a [Product]) -> Vec<Product>
where
    F: Filter<&'a Product>,
    S: Selector<&'a Product>,
{
    let result = filter.filter(products.iter().collect());
    log::debug!(
        "{} kept {} of {} products",
        filter.name(),
        result.kept.len(),
        products.len()
    );
    let selected = selector.select(result.kept);
    log::debug!("{} selected {} products", selector.name(), selected.len());
    selected.into_iter().cloned().collect()
}

/// Summarize products with the default configuration.
pub fn summarize<Tz: TimeZone>(products: &[Product], now: &DateTime<Tz>) -> ProductSummary {
    SummaryPipeline::default().run(products, now)
}

pub fn summarize_with<Tz: TimeZone>(
    products: &[Product],
    now: &DateTime<Tz>,
    config: &EngineConfig,
) -> ProductSummary {
    SummaryPipeline::new(config).run(products, now)
}

/// Top sellers by profit under the default configuration.
pub fn best_sellers(products: &[Product]) -> Vec<Product> {
    SummaryPipeline::default().best_sellers(products)
}

/// Low-stock products under the default configuration.
pub fn low_stock_items(products: &[Product]) -> Vec<Product> {
    SummaryPipeline::default().low_stock_items(products)
}
