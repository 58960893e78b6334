use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Product records
// ---------------------------------------------------------------------------

/// Whether a product has been sold, and on what terms.
///
/// The sale fields are optional even on `Sold`: storage does not enforce
/// that a sold record carries a price and date, and the engine must still
/// produce a summary when it doesn't.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SaleStatus {
    #[default]
    Unsold,
    Sold {
        /// Sale price for the record (the whole lot, not per unit).
        price: Option<f64>,
        /// Epoch milliseconds.
        date: Option<i64>,
    },
}

impl SaleStatus {
    pub fn is_sold(&self) -> bool {
        matches!(self, SaleStatus::Sold { .. })
    }
}

/// A single product's inventory/sale entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProductRecord", into = "ProductRecord")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Units currently in stock.
    pub quantity: u32,
    /// Per-unit acquisition cost.
    pub original_price: f64,
    /// Raw category label as stored. Resolved against the configured
    /// `CategorySet` at aggregation time.
    pub category: String,
    pub sale: SaleStatus,
    pub buyer_info: Option<String>,
    /// Falls back to the configured default (5) when absent.
    pub low_stock_threshold: Option<u32>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Product {
    pub fn is_sold(&self) -> bool {
        self.sale.is_sold()
    }

    /// Sale price, only if the product is sold and the price was recorded.
    pub fn sold_price(&self) -> Option<f64> {
        match self.sale {
            SaleStatus::Sold { price, .. } => price,
            SaleStatus::Unsold => None,
        }
    }

    /// Sale timestamp, only if the product is sold and the date was recorded.
    pub fn sold_date(&self) -> Option<i64> {
        match self.sale {
            SaleStatus::Sold { date, .. } => date,
            SaleStatus::Unsold => None,
        }
    }

    /// Capital tied up in this record: `original_price * quantity`.
    pub fn investment(&self) -> f64 {
        self.original_price * self.quantity as f64
    }

    pub fn effective_threshold(&self, default_threshold: u32) -> u32 {
        self.low_stock_threshold.unwrap_or(default_threshold)
    }
}

/// Flat wire shape of a product as the realtime database stores it.
///
/// `soldPrice`/`soldDate` are nullable siblings of `isSold` here; converting
/// into `Product` folds them into `SaleStatus`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_sold: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<u32>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        // Stray sale fields on an unsold record are dropped.
        let sale = if r.is_sold {
            SaleStatus::Sold {
                price: r.sold_price,
                date: r.sold_date,
            }
        } else {
            SaleStatus::Unsold
        };
        Product {
            id: r.id,
            name: r.name,
            quantity: r.quantity,
            original_price: r.original_price,
            category: r.category,
            sale,
            buyer_info: r.buyer_info,
            low_stock_threshold: r.low_stock_threshold,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<Product> for ProductRecord {
    fn from(p: Product) -> Self {
        ProductRecord {
            is_sold: p.is_sold(),
            sold_price: p.sold_price(),
            sold_date: p.sold_date(),
            id: p.id,
            name: p.name,
            quantity: p.quantity,
            original_price: p.original_price,
            category: p.category,
            buyer_info: p.buyer_info,
            low_stock_threshold: p.low_stock_threshold,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

/// Direction of a realized profit or loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProfitLossStatus {
    Gain,
    Loss,
    Even,
}

impl fmt::Display for ProfitLossStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitLossStatus::Gain => write!(f, "\u{2191} Gain"),
            ProfitLossStatus::Loss => write!(f, "\u{2193} Loss"),
            ProfitLossStatus::Even => write!(f, "\u{2192} Even"),
        }
    }
}

/// One calendar month of sales.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlySales {
    /// `"Oct 2026"` style label. Serialized as `date` for chart consumers.
    #[serde(rename = "date")]
    pub label: String,
    pub year: i32,
    /// 1-based calendar month.
    pub month: u32,
    pub sales: f64,
    pub profit: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Record counts per configured category, in configuration order.
///
/// Serializes as a JSON object (`{"Electronics": 2, ...}`) preserving order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryCount>,
}

impl CategoryBreakdown {
    pub fn new(entries: Vec<CategoryCount>) -> Self {
        Self { entries }
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts. Equals the number of records tallied.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.category, &entry.count)?;
        }
        map.end()
    }
}

/// A closed sale, flattened for history views.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleEntry {
    pub product_id: String,
    pub product_name: String,
    pub sold_date: i64,
    pub sold_price: f64,
    pub original_price: f64,
    pub profit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_info: Option<String>,
}

/// Business summary derived from a product collection.
///
/// Recomputed from scratch on every call; holds no incremental state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub total_products: usize,
    pub sold_products: usize,
    pub unsold_products: usize,
    pub total_investment: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub average_price: f64,
    /// `total_profit / total_revenue * 100`, or 0 without revenue.
    pub profit_margin: f64,
    pub monthly_sales: Vec<MonthlySales>,
    pub best_sellers: Vec<Product>,
    pub low_stock_items: Vec<Product>,
    /// Length of `low_stock_items` after truncation, not the full count of
    /// understocked records.
    pub low_stock_count: usize,
    pub category_breakdown: CategoryBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_to_product_folds_sale_fields() {
        let record = ProductRecord {
            id: "p1".into(),
            is_sold: true,
            sold_price: Some(80.0),
            sold_date: Some(1_700_000_000_000),
            ..ProductRecord::default()
        };
        let product = Product::from(record);
        assert_eq!(
            product.sale,
            SaleStatus::Sold {
                price: Some(80.0),
                date: Some(1_700_000_000_000)
            }
        );
    }

    #[test]
    fn unsold_record_drops_stray_sale_fields() {
        let record = ProductRecord {
            is_sold: false,
            sold_price: Some(80.0),
            ..ProductRecord::default()
        };
        let product = Product::from(record);
        assert_eq!(product.sale, SaleStatus::Unsold);
        assert_eq!(product.sold_price(), None);
    }

    #[test]
    fn product_deserializes_from_camel_case_json() {
        let json = r#"{
            "id": "abc",
            "name": "Headphones",
            "quantity": 3,
            "originalPrice": 40.5,
            "category": "Electronics",
            "isSold": true,
            "soldPrice": 60,
            "soldDate": 1760745600000,
            "createdAt": 1,
            "updatedAt": 2
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.quantity, 3);
        assert!((product.original_price - 40.5).abs() < 1e-9);
        assert_eq!(product.sold_price(), Some(60.0));
        assert_eq!(product.sold_date(), Some(1_760_745_600_000));
        assert_eq!(product.low_stock_threshold, None);
    }

    #[test]
    fn product_serializes_back_to_wire_shape() {
        let product = Product::from(ProductRecord {
            id: "x".into(),
            quantity: 2,
            original_price: 10.0,
            ..ProductRecord::default()
        });
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["isSold"], serde_json::json!(false));
        assert_eq!(value["originalPrice"], serde_json::json!(10.0));
        assert!(value.get("soldPrice").is_none());
    }

    #[test]
    fn category_breakdown_serializes_in_order() {
        let breakdown = CategoryBreakdown::new(vec![
            CategoryCount { category: "Electronics".into(), count: 2 },
            CategoryCount { category: "Clothing".into(), count: 0 },
            CategoryCount { category: "Other".into(), count: 1 },
        ]);
        let json = serde_json::to_string(&breakdown).unwrap();
        assert_eq!(json, r#"{"Electronics":2,"Clothing":0,"Other":1}"#);
        assert_eq!(breakdown.total(), 3);
        assert_eq!(breakdown.get("Clothing"), Some(0));
        assert_eq!(breakdown.get("Toys"), None);
    }
}
