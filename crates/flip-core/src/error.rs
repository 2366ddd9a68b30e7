//! Error types for the analytics engine.
//!
//! The analytic components themselves never fail: missing or degenerate
//! market data degrades to a documented default (a skipped item, a WAIT
//! signal, a zero score). Errors exist only at the boundaries where data
//! is loaded or configuration is parsed.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum FlipError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors from snapshot and trade-log loading.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Item not found: {0}")]
    ItemNotFound(u32),

    #[error("No data available at {0}")]
    NoDataAvailable(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fallible boundary operations.
pub type FlipResult<T> = Result<T, FlipError>;
