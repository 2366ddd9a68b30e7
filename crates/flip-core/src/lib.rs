//! Core types and market math for the Grand Exchange analytics engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (quotes, 24h stats, time series, item catalog)
//! - Trade log and ledger types
//! - Tax, margin, and volatility arithmetic
//! - Core traits for indicators

pub mod error;
pub mod math;
pub mod traits;
pub mod types;

pub use error::{DataError, FlipError, FlipResult};
pub use traits::*;
pub use types::*;
