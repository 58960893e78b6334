//! Engine error types.
//!
//! The aggregation functions are total and never fail. Errors only come
//! from the edges: loading records, configuration, and the product store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid product record '{key}': {source}")]
    Record {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Product export must be a JSON array or object, got {0}")]
    InvalidExport(&'static str),

    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Unsupported product file extension: {0} (expected .json or .csv)")]
    UnsupportedFormat(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Umbrella error for callers that touch more than one edge.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for engine edge operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
