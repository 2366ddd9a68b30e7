//! Core data types for the analytics engine.

mod market;
mod signal;
mod trade;

pub use market::{ItemMeta, PeriodStats, PriceQuote, StrategyFilter, TimeSeriesPoint};
pub use signal::{IndicatorSnapshot, RiskProfile, SignalAction, SignalConfig, SignalResult, Trend};
pub use trade::{Holding, MatchedFlip, Side, Trade, Transaction};
