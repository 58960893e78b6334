use chrono::{DateTime, TimeZone, Utc};

use stockledger_engine::calculations::profit_loss_percentage;
use stockledger_engine::config::{CategorySet, EngineConfig};
use stockledger_engine::store::{NewProduct, ProductStore};
use stockledger_engine::summary::{summarize, summarize_with};
use stockledger_engine::types::{Product, SaleStatus};

// ---------------------------------------------------------------------------
// Test data fixtures
// ---------------------------------------------------------------------------

/// 2026-10-10 12:00:00 UTC
const OCT_10_2026_MS: i64 = 1_791_633_600_000;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()
}

fn fixed_clock() -> i64 {
    OCT_10_2026_MS
}

fn unsold(id: &str, original_price: f64, quantity: u32, category: &str) -> Product {
    Product {
        id: id.into(),
        name: id.into(),
        quantity,
        original_price,
        category: category.into(),
        sale: SaleStatus::Unsold,
        buyer_info: None,
        low_stock_threshold: None,
        created_at: 0,
        updated_at: 0,
    }
}

fn sold(id: &str, original_price: f64, price: f64, date: i64) -> Product {
    Product {
        sale: SaleStatus::Sold {
            price: Some(price),
            date: Some(date),
        },
        ..unsold(id, original_price, 1, "Electronics")
    }
}

/// A mixed inventory: stock on the shelf, closed sales across months, one
/// sale with no recorded price, and a record with an unknown category.
fn mixed_inventory() -> Vec<Product> {
    let month_ms = 31 * 24 * 3600 * 1000_i64;
    vec![
        unsold("shelf-a", 100.0, 2, "Electronics"),
        unsold("shelf-b", 12.0, 9, "Clothing"),
        unsold("shelf-c", 3.5, 1, "Accessories"),
        unsold("shelf-d", 8.0, 4, "Anime"),
        sold("sale-1", 50.0, 80.0, OCT_10_2026_MS),
        sold("sale-2", 20.0, 15.0, OCT_10_2026_MS - month_ms),
        sold("sale-3", 5.0, 45.0, OCT_10_2026_MS - 3 * month_ms),
        Product {
            sale: SaleStatus::Sold {
                price: None,
                date: Some(OCT_10_2026_MS),
            },
            ..unsold("sale-no-price", 30.0, 1, "Clothing")
        },
    ]
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn counts_partition_total() {
    let summary = summarize(&mixed_inventory(), &now());
    assert_eq!(
        summary.total_products,
        summary.sold_products + summary.unsold_products
    );
    assert_eq!(summary.sold_products, 4);
    assert_eq!(summary.unsold_products, 4);
}

#[test]
fn profit_equals_revenue_minus_sold_cost() {
    let products = mixed_inventory();
    let summary = summarize(&products, &now());
    let sold_cost: f64 = products
        .iter()
        .filter(|p| p.is_sold())
        .map(|p| p.original_price)
        .sum();
    assert!(approx(summary.total_profit, summary.total_revenue - sold_cost));
    assert!(approx(summary.total_revenue, 140.0));
}

#[test]
fn empty_input_yields_zeroed_summary() {
    let summary = summarize(&[], &now());

    assert_eq!(summary.total_products, 0);
    assert_eq!(summary.sold_products, 0);
    assert_eq!(summary.unsold_products, 0);
    assert_eq!(summary.total_investment, 0.0);
    assert_eq!(summary.total_revenue, 0.0);
    assert_eq!(summary.total_profit, 0.0);
    assert_eq!(summary.average_price, 0.0);
    assert!(!summary.average_price.is_nan());
    assert_eq!(summary.profit_margin, 0.0);
    assert_eq!(summary.monthly_sales.len(), 6);
    assert!(summary
        .monthly_sales
        .iter()
        .all(|m| m.sales == 0.0 && m.profit == 0.0));
    assert!(summary.best_sellers.is_empty());
    assert!(summary.low_stock_items.is_empty());
    assert_eq!(summary.low_stock_count, 0);
    let categories: Vec<(&str, usize)> = summary
        .category_breakdown
        .iter()
        .map(|e| (e.category.as_str(), e.count))
        .collect();
    assert_eq!(
        categories,
        vec![
            ("Electronics", 0),
            ("Clothing", 0),
            ("Accessories", 0),
            ("Other", 0)
        ]
    );
}

#[test]
fn percentage_is_zero_for_free_stock() {
    let freebie = sold("gift", 0.0, 99.0, OCT_10_2026_MS);
    assert_eq!(profit_loss_percentage(&freebie), 0.0);
}

#[test]
fn best_sellers_rank_by_profit() {
    let profits = [10.0, -5.0, 20.0, 0.0, 15.0, 8.0];
    let products: Vec<Product> = profits
        .iter()
        .enumerate()
        .map(|(i, profit)| sold(&format!("s{}", i), 100.0, 100.0 + profit, OCT_10_2026_MS))
        .collect();
    let summary = summarize(&products, &now());
    let ranked: Vec<f64> = summary
        .best_sellers
        .iter()
        .map(|p| p.sold_price().unwrap_or(0.0) - p.original_price)
        .collect();
    assert_eq!(ranked, vec![20.0, 15.0, 10.0, 8.0, 0.0]);
}

#[test]
fn low_stock_ascending_excludes_well_stocked() {
    let products: Vec<Product> = [3, 10, 1, 5]
        .iter()
        .enumerate()
        .map(|(i, q)| unsold(&format!("u{}", i), 1.0, *q, "Other"))
        .collect();
    let summary = summarize(&products, &now());
    let quantities: Vec<u32> = summary.low_stock_items.iter().map(|p| p.quantity).collect();
    assert_eq!(quantities, vec![1, 3, 5]);
    assert_eq!(summary.low_stock_count, 3);
}

#[test]
fn unknown_category_counts_as_other() {
    let products = vec![
        unsold("a", 1.0, 10, "Electronics"),
        unsold("b", 1.0, 10, "Electronics"),
        unsold("c", 1.0, 10, ""),
        unsold("d", 1.0, 10, "Clothing"),
    ];
    let summary = summarize(&products, &now());
    let json = serde_json::to_value(&summary.category_breakdown).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"Electronics": 2, "Clothing": 1, "Accessories": 0, "Other": 1})
    );
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn two_product_scenario() {
    let products = vec![
        unsold("stock", 100.0, 2, "Electronics"),
        sold("sale", 50.0, 80.0, OCT_10_2026_MS),
    ];
    let summary = summarize(&products, &now());

    assert!(approx(summary.total_investment, 250.0));
    assert!(approx(summary.total_revenue, 80.0));
    assert!(approx(summary.total_profit, 30.0));
    assert!(approx(summary.average_price, 125.0));

    let (current, earlier) = summary.monthly_sales.split_last().unwrap();
    assert_eq!(current.label, "Oct 2026");
    assert!(approx(current.sales, 80.0));
    assert!(approx(current.profit, 30.0));
    assert!(earlier.iter().all(|m| m.sales == 0.0 && m.profit == 0.0));
}

#[test]
fn mixed_inventory_monthly_trend() {
    let summary = summarize(&mixed_inventory(), &now());
    let labels: Vec<&str> = summary.monthly_sales.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["May 2026", "Jun 2026", "Jul 2026", "Aug 2026", "Sep 2026", "Oct 2026"]
    );

    // October: sale-1 plus the priceless sale, which books its cost only.
    let oct = &summary.monthly_sales[5];
    assert!(approx(oct.sales, 80.0));
    assert!(approx(oct.profit, 0.0));

    let sep = &summary.monthly_sales[4];
    assert!(approx(sep.sales, 15.0));
    assert!(approx(sep.profit, -5.0));

    let jul = &summary.monthly_sales[2];
    assert!(approx(jul.sales, 45.0));
    assert!(approx(jul.profit, 40.0));
}

#[test]
fn summary_does_not_touch_input() {
    let products = mixed_inventory();
    let before = products.clone();
    let first = summarize(&products, &now());
    let second = summarize(&products, &now());
    assert_eq!(products, before);
    assert_eq!(first, second);
}

#[test]
fn custom_category_set_from_config() {
    let config = EngineConfig {
        categories: CategorySet::new(["Electronics", "Anime", "Accessories", "Toys"], "Other"),
        ..EngineConfig::default()
    };
    let summary = summarize_with(&mixed_inventory(), &now(), &config);
    assert_eq!(summary.category_breakdown.get("Anime"), Some(1));
    assert_eq!(summary.category_breakdown.get("Toys"), Some(0));
    // Clothing x2 fall back to Other.
    assert_eq!(summary.category_breakdown.get("Other"), Some(2));
    assert_eq!(summary.category_breakdown.total(), summary.total_products);
}

#[test]
fn store_lifecycle_feeds_summary() {
    let mut store = ProductStore::with_clock(fixed_clock);
    let headphones = store
        .add(NewProduct {
            name: "Headphones".into(),
            quantity: 1,
            original_price: 50.0,
            category: "Electronics".into(),
            ..NewProduct::default()
        })
        .unwrap();
    store
        .add(NewProduct {
            name: "Jacket".into(),
            quantity: 2,
            original_price: 100.0,
            category: "Clothing".into(),
            ..NewProduct::default()
        })
        .unwrap();
    let scrapped = store
        .add(NewProduct {
            name: "Broken cable".into(),
            quantity: 1,
            original_price: 2.0,
            category: "Electronics".into(),
            ..NewProduct::default()
        })
        .unwrap();

    store.mark_sold(&headphones.id, 80.0).unwrap();
    store.delete(&scrapped.id).unwrap();

    let summary = summarize(&store.list(), &now());
    assert_eq!(summary.total_products, 2);
    assert!(approx(summary.total_investment, 250.0));
    assert!(approx(summary.total_profit, 30.0));
    assert_eq!(summary.best_sellers.len(), 1);
    assert_eq!(summary.best_sellers[0].name, "Headphones");
    assert!(approx(summary.monthly_sales[5].sales, 80.0));
}

#[test]
fn summary_serializes_camel_case() {
    let summary = summarize(&mixed_inventory(), &now());
    let json = serde_json::to_value(&summary).unwrap();
    assert!(json.get("totalProducts").is_some());
    assert!(json.get("lowStockCount").is_some());
    assert!(json.get("profitMargin").is_some());
    assert_eq!(json["monthlySales"][5]["date"], "Oct 2026");
    assert_eq!(json["bestSellers"][0]["id"], "sale-3");
}
