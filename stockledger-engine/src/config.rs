//! Engine configuration.
//!
//! Loaded from a JSON file or from environment variables, with defaults for
//! anything unset. The category set lives here so the categories enumerated
//! in a breakdown and the categories accepted on input cannot drift apart.

use std::env;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Threshold used when a product carries no `lowStockThreshold`.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;
/// Number of monthly buckets, current month included.
pub const DEFAULT_MONTHS: u32 = 6;
/// Upper bound on monthly buckets (ten years).
pub const MAX_MONTHS: u32 = 120;
pub const DEFAULT_BEST_SELLERS_LIMIT: usize = 5;
pub const DEFAULT_LOW_STOCK_LIMIT: usize = 5;
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Other";

/// Display currency for amounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Bdt,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Bdt => "\u{09f3}",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "BDT" => Some(Currency::Bdt),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Usd => write!(f, "USD"),
            Currency::Bdt => write!(f, "BDT"),
        }
    }
}

/// Ordered set of known product categories plus the bucket that catches
/// everything else.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySet {
    pub known: Vec<String>,
    pub fallback: String,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(
            ["Electronics", "Clothing", "Accessories", "Other"],
            DEFAULT_FALLBACK_CATEGORY,
        )
    }
}

impl CategorySet {
    pub fn new<I, S>(known: I, fallback: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: known.into_iter().map(Into::into).collect(),
            fallback: fallback.to_string(),
        }
    }

    /// Every bucket a breakdown reports, in order. The fallback is appended
    /// if the known list doesn't already name it.
    pub fn buckets(&self) -> Vec<&str> {
        let mut buckets: Vec<&str> = self.known.iter().map(String::as_str).collect();
        if !buckets.contains(&self.fallback.as_str()) {
            buckets.push(&self.fallback);
        }
        buckets
    }

    /// Resolve a raw category label to its bucket.
    ///
    /// Matching ignores surrounding whitespace and ASCII case. Blank or
    /// unknown labels land in the fallback bucket.
    pub fn resolve<'a>(&'a self, raw: &str) -> &'a str {
        let trimmed = raw.trim();
        self.known
            .iter()
            .find(|known| known.eq_ignore_ascii_case(trimmed))
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }

    pub fn is_known(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        self.known.iter().any(|k| k.eq_ignore_ascii_case(trimmed))
    }
}

/// Configuration for the summary engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub categories: CategorySet,
    pub default_low_stock_threshold: u32,
    pub best_sellers_limit: usize,
    pub low_stock_limit: usize,
    pub months: u32,
    pub currency: Currency,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            categories: CategorySet::default(),
            default_low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            best_sellers_limit: DEFAULT_BEST_SELLERS_LIMIT,
            low_stock_limit: DEFAULT_LOW_STOCK_LIMIT,
            months: DEFAULT_MONTHS,
            currency: Currency::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `STOCKLEDGER_CATEGORIES` comma-separated known categories
    ///   (default: Electronics,Clothing,Accessories,Other)
    /// - `STOCKLEDGER_FALLBACK_CATEGORY` (default: Other)
    /// - `STOCKLEDGER_LOW_STOCK_THRESHOLD` (default: 5)
    /// - `STOCKLEDGER_MONTHS` 1 to 120 (default: 6)
    /// - `STOCKLEDGER_CURRENCY` USD or BDT (default: USD)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let fallback = env::var("STOCKLEDGER_FALLBACK_CATEGORY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.categories.fallback);

        let known = env::var("STOCKLEDGER_CATEGORIES")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.categories.known);

        Self {
            categories: CategorySet { known, fallback },
            default_low_stock_threshold: env::var("STOCKLEDGER_LOW_STOCK_THRESHOLD")
                .ok()
                .and_then(|s| s.trim().parse::<u32>().ok())
                .unwrap_or(defaults.default_low_stock_threshold),
            months: env::var("STOCKLEDGER_MONTHS")
                .ok()
                .and_then(|s| s.trim().parse::<u32>().ok())
                .filter(|m| (1..=MAX_MONTHS).contains(m))
                .unwrap_or(defaults.months),
            currency: env::var("STOCKLEDGER_CURRENCY")
                .ok()
                .and_then(|s| Currency::parse(&s))
                .unwrap_or(defaults.currency),
            ..defaults
        }
    }

    /// Load and validate configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.months == 0 {
            return Err(ConfigError::InvalidValue {
                field: "months",
                reason: "must cover at least one month".into(),
            });
        }
        if self.months > MAX_MONTHS {
            return Err(ConfigError::InvalidValue {
                field: "months",
                reason: format!("at most {} months, got {}", MAX_MONTHS, self.months),
            });
        }
        if self.categories.fallback.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "categories.fallback",
                reason: "fallback category name cannot be blank".into(),
            });
        }
        Ok(())
    }
}
