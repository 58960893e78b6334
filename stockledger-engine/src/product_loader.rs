//! Product export loader.
//!
//! Reads products exported from the realtime database, either as JSON
//! (an array of records, or an object keyed by product id) or as CSV with
//! columns:
//!   id, name, quantity, originalPrice, category, isSold, soldPrice,
//!   soldDate, lowStockThreshold, createdAt, updatedAt, buyerInfo
//!
//! `buyerInfo` and the columns after `soldDate` may be omitted.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::LoadError;
use crate::types::{Product, ProductRecord};

/// A CSV row. Booleans arrive as text, blank optional cells as `None`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvProductRow {
    id: String,
    name: String,
    quantity: u32,
    original_price: f64,
    #[serde(default)]
    category: String,
    #[serde(deserialize_with = "deserialize_bool")]
    is_sold: bool,
    sold_price: Option<f64>,
    sold_date: Option<i64>,
    #[serde(default)]
    low_stock_threshold: Option<u32>,
    #[serde(default)]
    created_at: i64,
    #[serde(default)]
    updated_at: i64,
    #[serde(default)]
    buyer_info: Option<String>,
}

impl CsvProductRow {
    fn into_record(self) -> ProductRecord {
        ProductRecord {
            id: self.id,
            name: self.name,
            quantity: self.quantity,
            original_price: self.original_price,
            category: self.category,
            is_sold: self.is_sold,
            sold_price: self.sold_price,
            sold_date: self.sold_date,
            buyer_info: self.buyer_info.filter(|b| !b.is_empty()),
            low_stock_threshold: self.low_stock_threshold,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Load products from a JSON reader.
///
/// Accepts an array of records or an object keyed by product id. For keyed
/// exports, a record with a blank `id` takes its key as id. A malformed
/// record fails the load with an error naming its key (or array index).
pub fn load_products_json<R: Read>(reader: R) -> Result<Vec<Product>, LoadError> {
    let export: Value = serde_json::from_reader(reader)?;
    let records = match export {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_record(index.to_string(), item))
            .collect::<Result<Vec<_>, _>>()?,
        Value::Object(map) => map
            .into_iter()
            .map(|(key, item)| {
                let mut record = parse_record(key.clone(), item)?;
                if record.id.is_empty() {
                    record.id = key;
                }
                Ok(record)
            })
            .collect::<Result<Vec<_>, LoadError>>()?,
        other => return Err(LoadError::InvalidExport(json_kind(&other))),
    };
    Ok(records.into_iter().map(Product::from).collect())
}

fn parse_record(key: String, item: Value) -> Result<ProductRecord, LoadError> {
    serde_json::from_value(item).map_err(|source| LoadError::Record { key, source })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Load products from a CSV reader.
pub fn load_products_csv<R: Read>(reader: R) -> Result<Vec<Product>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut products = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: CsvProductRow = result.map_err(|source| LoadError::Csv {
            line: line_num + 2,
            source,
        })?;
        products.push(Product::from(row.into_record()));
    }

    Ok(products)
}

/// Load products from a file, picking the format from its extension.
pub fn load_products_file<P: AsRef<Path>>(path: P) -> Result<Vec<Product>, LoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let open = || {
        std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })
    };

    let products = match extension.as_str() {
        "json" => load_products_json(std::io::BufReader::new(open()?))?,
        "csv" => load_products_csv(open()?)?,
        _ => return Err(LoadError::UnsupportedFormat(path.display().to_string())),
    };
    log::info!("loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

/// Order products the way the storage listing does: newest `createdAt` first.
pub fn sort_newest_first(products: &mut [Product]) {
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Flexible bool deserializer: handles "true"/"false", "1"/"0", "yes"/"no".
fn deserialize_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.to_lowercase().trim() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected bool value, got '{}'",
            other
        ))),
    }
}
