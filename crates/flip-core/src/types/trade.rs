//! Trade log and ledger types.

use serde::{Deserialize, Serialize};

/// Which side of the book a ledger transaction hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// One raw entry in a user's trade log.
///
/// A pure buy carries only `buy_price`, a pure sell only `sell_price`.
/// An entry with both prices positive and a nonzero profit is a manually
/// logged, already-completed flip and bypasses FIFO matching entirely.
/// The log is append-only; ordering by `timestamp` drives matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub item_id: u32,
    pub quantity: i64,
    #[serde(default)]
    pub buy_price: i64,
    #[serde(default)]
    pub sell_price: i64,
    #[serde(default)]
    pub profit: i64,
    pub timestamp: i64,
}

impl Trade {
    /// Create a pure buy entry.
    pub fn buy(id: impl Into<String>, item_id: u32, quantity: i64, price: i64, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            item_id,
            quantity,
            buy_price: price,
            sell_price: 0,
            profit: 0,
            timestamp,
        }
    }

    /// Create a pure sell entry.
    pub fn sell(id: impl Into<String>, item_id: u32, quantity: i64, price: i64, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            item_id,
            quantity,
            buy_price: 0,
            sell_price: price,
            profit: 0,
            timestamp,
        }
    }

    /// True for a pure buy entry.
    pub fn is_buy(&self) -> bool {
        self.buy_price > 0 && self.sell_price == 0
    }

    /// True for a pure sell entry.
    pub fn is_sell(&self) -> bool {
        self.sell_price > 0 && self.buy_price == 0
    }

    /// True for a manually logged completed round trip.
    pub fn is_completed_entry(&self) -> bool {
        self.buy_price > 0 && self.sell_price > 0 && self.profit != 0
    }
}

/// One journal entry in the portfolio ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub item_id: u32,
    pub side: Side,
    pub quantity: i64,
    pub price: i64,
    pub timestamp: i64,
}

/// Current open position for one item.
///
/// Holdings with zero quantity are removed from the map entirely; a
/// `Holding` in the map always has positive quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub item_id: u32,
    pub quantity: i64,
    pub avg_buy_price: f64,
}

/// One completed buy-then-sell round trip, possibly assembled from
/// multiple raw trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedFlip {
    pub item_id: u32,
    pub quantity: i64,
    pub avg_buy_price: f64,
    pub sell_price: i64,
    pub profit: i64,
    /// Completion time (the sell timestamp)
    pub timestamp: i64,
    pub buy_trade_ids: Vec<String>,
    pub sell_trade_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_classification() {
        let buy = Trade::buy("b1", 2, 100, 180, 1_000);
        assert!(buy.is_buy());
        assert!(!buy.is_sell());
        assert!(!buy.is_completed_entry());

        let sell = Trade::sell("s1", 2, 100, 195, 2_000);
        assert!(sell.is_sell());
        assert!(!sell.is_buy());

        let manual = Trade {
            id: "m1".to_string(),
            item_id: 2,
            quantity: 50,
            buy_price: 180,
            sell_price: 200,
            profit: 800,
            timestamp: 3_000,
        };
        assert!(manual.is_completed_entry());
        assert!(!manual.is_buy());
        assert!(!manual.is_sell());
    }

    #[test]
    fn test_side_serde() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), r#""buy""#);
        let side: Side = serde_json::from_str(r#""sell""#).unwrap();
        assert_eq!(side, Side::Sell);
    }
}
