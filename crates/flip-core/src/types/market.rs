//! Market snapshot types.
//!
//! Field names follow the wire shapes of the price feed, so these types
//! deserialize directly from captured snapshots.

use serde::{Deserialize, Serialize};

/// Instantaneous best quotes for one item.
///
/// `high` is the sell-side (instant-buy) price, `low` the buy-side
/// (instant-sell) price. Times are unix seconds of the last trade on each
/// side. Either side can be absent for thinly traded items. Immutable
/// snapshot, replaced wholesale on each poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub high: Option<i64>,
    #[serde(rename = "highTime")]
    pub high_time: Option<i64>,
    pub low: Option<i64>,
    #[serde(rename = "lowTime")]
    pub low_time: Option<i64>,
}

impl PriceQuote {
    /// Unix time of the most recent trade on either side.
    pub fn last_trade_time(&self) -> Option<i64> {
        match (self.high_time, self.low_time) {
            (Some(h), Some(l)) => Some(h.max(l)),
            (Some(h), None) => Some(h),
            (None, Some(l)) => Some(l),
            (None, None) => None,
        }
    }
}

/// Trailing 24h aggregates for one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub avg_high_price: Option<i64>,
    #[serde(default)]
    pub high_price_volume: i64,
    pub avg_low_price: Option<i64>,
    #[serde(default)]
    pub low_price_volume: i64,
}

impl PeriodStats {
    /// Total units traded across both sides.
    pub fn daily_volume(&self) -> i64 {
        self.high_price_volume + self.low_price_volume
    }
}

/// One bucket of historical aggregate data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub timestamp: i64,
    pub avg_high_price: Option<i64>,
    pub avg_low_price: Option<i64>,
    #[serde(default)]
    pub high_price_volume: i64,
    #[serde(default)]
    pub low_price_volume: i64,
}

impl TimeSeriesPoint {
    /// Midpoint of the two averages, when both sides traded.
    pub fn mid_price(&self) -> Option<f64> {
        match (self.avg_high_price, self.avg_low_price) {
            (Some(h), Some(l)) => Some((h + l) as f64 / 2.0),
            _ => None,
        }
    }
}

/// Static catalog entry for one tradable item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMeta {
    pub id: u32,
    pub name: String,
    /// Max tradable quantity per 4-hour window
    pub limit: Option<i64>,
    /// Fixed alchemy conversion value, the "safe floor" price
    #[serde(rename = "highalch")]
    pub high_alch: Option<i64>,
    #[serde(default)]
    pub members: bool,
}

/// User-defined admission thresholds for the market scanner.
///
/// All bounds are inclusive. The default admits everything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyFilter {
    pub min_price: i64,
    pub max_price: i64,
    pub min_volume: i64,
    pub min_roi: f64,
}

impl Default for StrategyFilter {
    fn default() -> Self {
        Self {
            min_price: 0,
            max_price: i64::MAX,
            min_volume: 0,
            min_roi: 0.0,
        }
    }
}
