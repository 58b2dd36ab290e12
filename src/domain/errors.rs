use thiserror::Error;

/// Errors raised while turning decoded rows into an observation batch
#[derive(Debug, Error, PartialEq)]
pub enum ObservationError {
    #[error("Schema error: required column '{column}' not found (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Invalid value in row {row}, column '{column}': {raw:?}")]
    InvalidRow {
        row: usize,
        column: String,
        raw: String,
    },

    #[error("Failed to decode observations: {reason}")]
    Decode { reason: String },
}

/// Errors raised when a metric vector cannot be computed
#[derive(Debug, Error, PartialEq)]
pub enum MetricsError {
    #[error("Cannot compute metrics on an empty batch")]
    EmptyBatch,

    #[error("R² is undefined: all {count} ground-truth values equal {value}")]
    DegenerateInput { value: f64, count: usize },

    #[error("Metric '{metric}' is not finite ({value})")]
    NonFinite { metric: &'static str, value: f64 },
}

/// Errors raised while reading a persisted baseline snapshot
#[derive(Debug, Error, PartialEq)]
pub enum BaselineError {
    #[error("Malformed baseline: {reason}")]
    Malformed { reason: String },

    #[error("Malformed baseline: missing key '{key}'")]
    MissingKey { key: &'static str },

    #[error("Malformed baseline: key '{key}' is not a finite number ({raw})")]
    NonNumeric { key: &'static str, raw: String },
}

/// Errors surfaced by blob store adapters
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Object not found: {path}")]
    NotFound { path: String },

    #[error("Invalid object path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Store request for {path} failed with HTTP {status}: {body}")]
    Http {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Store I/O failed for {path}: {reason}")]
    Io { path: String, reason: String },
}
