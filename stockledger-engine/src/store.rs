//! In-memory product store.
//!
//! Mirrors the record lifecycle of the hosted database the frontend writes
//! to: creation assigns an id and timestamps, updates refresh `updated_at`,
//! marking sold stamps the sale, deletion is permanent. The summary engine
//! only ever reads `list()`.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::components::product_list_filter::ProductListFilter;
use crate::error::StoreError;
use crate::types::{Product, SaleStatus};

/// Fields supplied by the caller when creating a product.
#[derive(Clone, Debug, Default)]
pub struct NewProduct {
    pub name: String,
    pub quantity: u32,
    pub original_price: f64,
    pub category: String,
    pub low_stock_threshold: Option<u32>,
    pub buyer_info: Option<String>,
}

/// Partial update. `None` leaves the field untouched.
#[derive(Clone, Debug, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub original_price: Option<f64>,
    pub category: Option<String>,
    pub low_stock_threshold: Option<u32>,
    pub buyer_info: Option<String>,
}

fn system_clock() -> i64 {
    Utc::now().timestamp_millis()
}

pub struct ProductStore {
    products: HashMap<String, Product>,
    clock: fn() -> i64,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    pub fn new() -> Self {
        Self::with_clock(system_clock)
    }

    /// Create a store whose timestamps come from `clock` (epoch millis).
    pub fn with_clock(clock: fn() -> i64) -> Self {
        Self {
            products: HashMap::new(),
            clock,
        }
    }

    /// Seed a store with already-persisted products, keyed by their ids.
    pub fn from_products<I: IntoIterator<Item = Product>>(products: I) -> Self {
        let mut store = Self::new();
        for product in products {
            store.products.insert(product.id.clone(), product);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn add(&mut self, new: NewProduct) -> Result<Product, StoreError> {
        check_name(&new.name)?;
        check_price("original_price", new.original_price)?;
        let now = (self.clock)();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            quantity: new.quantity,
            original_price: new.original_price,
            category: new.category,
            sale: SaleStatus::Unsold,
            buyer_info: new.buyer_info,
            low_stock_threshold: new.low_stock_threshold,
            created_at: now,
            updated_at: now,
        };
        log::debug!("added product id={} name={}", product.id, product.name);
        self.products.insert(product.id.clone(), product.clone());
        Ok(product)
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    /// All products, newest `created_at` first. Ties break on id so the
    /// listing is deterministic.
    pub fn list(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.products.values().cloned().collect();
        products.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        products
    }

    /// `list()` narrowed by sale status and name search.
    pub fn search(&self, filter: &ProductListFilter) -> Vec<Product> {
        filter.apply(&self.list())
    }

    pub fn update(&mut self, id: &str, update: ProductUpdate) -> Result<Product, StoreError> {
        if let Some(name) = &update.name {
            check_name(name)?;
        }
        if let Some(price) = update.original_price {
            check_price("original_price", price)?;
        }
        let now = (self.clock)();
        let product = self
            .products
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(name) = update.name {
            product.name = name;
        }
        if let Some(quantity) = update.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = update.original_price {
            product.original_price = price;
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(threshold) = update.low_stock_threshold {
            product.low_stock_threshold = Some(threshold);
        }
        if let Some(buyer) = update.buyer_info {
            product.buyer_info = Some(buyer);
        }
        product.updated_at = now;
        Ok(product.clone())
    }

    /// Record a sale at `sold_price`, dated now.
    pub fn mark_sold(&mut self, id: &str, sold_price: f64) -> Result<Product, StoreError> {
        check_price("sold_price", sold_price)?;
        let now = (self.clock)();
        let product = self
            .products
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        product.sale = SaleStatus::Sold {
            price: Some(sold_price),
            date: Some(now),
        };
        product.updated_at = now;
        log::debug!("marked product id={} sold for {:.2}", id, sold_price);
        Ok(product.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<Product, StoreError> {
        self.products
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

fn check_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        Err(StoreError::InvalidField {
            field: "name",
            reason: "product name cannot be blank".into(),
        })
    } else {
        Ok(())
    }
}

fn check_price(field: &'static str, value: f64) -> Result<(), StoreError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StoreError::InvalidField {
            field,
            reason: format!("expected a non-negative amount, got {}", value),
        })
    }
}
