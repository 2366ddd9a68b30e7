//! Cash and holdings ledger.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flip_core::math;
use flip_core::types::{Holding, PriceQuote, Side, Transaction};

/// Starting bankroll for a fresh ledger.
pub const DEFAULT_STARTING_CASH: i64 = 10_000_000;

/// Valuation of the open positions at current prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Cost basis of all open holdings
    pub invested: f64,
    /// Value at the current high quote, net of tax
    pub current_value: f64,
    pub unrealized_profit: f64,
}

/// Tracks cash, open holdings, and the transaction journal.
///
/// Purely an accounting view: it records what the user says happened and
/// never validates against market data. Overselling a holding floors the
/// position to flat rather than going short.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioLedger {
    cash: i64,
    holdings: HashMap<u32, Holding>,
    /// Newest first
    transactions: Vec<Transaction>,
    #[serde(default = "default_cash")]
    starting_cash: i64,
}

fn default_cash() -> i64 {
    DEFAULT_STARTING_CASH
}

impl Default for PortfolioLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioLedger {
    pub fn new() -> Self {
        Self::with_starting_cash(DEFAULT_STARTING_CASH)
    }

    pub fn with_starting_cash(cash: i64) -> Self {
        Self {
            cash,
            holdings: HashMap::new(),
            transactions: Vec::new(),
            starting_cash: cash,
        }
    }

    pub fn cash(&self) -> i64 {
        self.cash
    }

    pub fn holdings(&self) -> &HashMap<u32, Holding> {
        &self.holdings
    }

    /// Transaction journal, most recent first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Record a buy or sell and return the journal entry.
    ///
    /// Buys fold into the weighted-average cost of the holding. Sells
    /// release quantity at the recorded average; selling more than is
    /// held simply closes the position.
    pub fn record_transaction(
        &mut self,
        item_id: u32,
        side: Side,
        quantity: i64,
        price: i64,
    ) -> &Transaction {
        match side {
            Side::Buy => {
                self.cash -= quantity * price;
                self.holdings
                    .entry(item_id)
                    .and_modify(|h| {
                        let total_qty = h.quantity + quantity;
                        h.avg_buy_price = (h.quantity as f64 * h.avg_buy_price
                            + (quantity * price) as f64)
                            / total_qty as f64;
                        h.quantity = total_qty;
                    })
                    .or_insert(Holding {
                        item_id,
                        quantity,
                        avg_buy_price: price as f64,
                    });
            }
            Side::Sell => {
                self.cash += quantity * price;
                if let Some(holding) = self.holdings.get_mut(&item_id) {
                    let remaining = holding.quantity - quantity;
                    if remaining <= 0 {
                        self.holdings.remove(&item_id);
                    } else {
                        holding.quantity = remaining;
                    }
                }
            }
        }

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            item_id,
            side,
            quantity,
            price,
            timestamp: Utc::now().timestamp(),
        };
        self.transactions.insert(0, transaction);
        &self.transactions[0]
    }

    /// Restore the starting cash and clear all positions and history.
    pub fn reset(&mut self) {
        self.cash = self.starting_cash;
        self.holdings.clear();
        self.transactions.clear();
    }

    /// Value the open holdings against the current snapshot.
    ///
    /// Positions are valued at the instant high quote net of tax; items
    /// without a usable quote are carried at cost.
    pub fn summary(&self, prices: &HashMap<u32, PriceQuote>) -> PortfolioSummary {
        let mut invested = 0.0;
        let mut current_value = 0.0;

        for holding in self.holdings.values() {
            let cost = holding.quantity as f64 * holding.avg_buy_price;
            invested += cost;

            let unit_value = prices
                .get(&holding.item_id)
                .and_then(|p| p.high)
                .filter(|&h| h > 0)
                .map(|h| (h - math::tax(h)) as f64);
            current_value += match unit_value {
                Some(v) => holding.quantity as f64 * v,
                None => cost,
            };
        }

        PortfolioSummary {
            invested,
            current_value,
            unrealized_profit: current_value - invested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ledger_defaults() {
        let ledger = PortfolioLedger::new();
        assert_eq!(ledger.cash(), DEFAULT_STARTING_CASH);
        assert!(ledger.holdings().is_empty());
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_buy_moves_cash_into_holding() {
        let mut ledger = PortfolioLedger::new();
        ledger.record_transaction(1, Side::Buy, 100, 1_000);

        assert_eq!(ledger.cash(), DEFAULT_STARTING_CASH - 100_000);
        let holding = &ledger.holdings()[&1];
        assert_eq!(holding.quantity, 100);
        assert_eq!(holding.avg_buy_price, 1_000.0);
    }

    #[test]
    fn test_buys_average_their_cost() {
        let mut ledger = PortfolioLedger::new();
        ledger.record_transaction(1, Side::Buy, 10, 100);
        ledger.record_transaction(1, Side::Buy, 10, 200);

        let holding = &ledger.holdings()[&1];
        assert_eq!(holding.quantity, 20);
        assert_eq!(holding.avg_buy_price, 150.0);
    }

    #[test]
    fn test_partial_sell_keeps_average() {
        let mut ledger = PortfolioLedger::new();
        ledger.record_transaction(1, Side::Buy, 10, 100);
        ledger.record_transaction(1, Side::Sell, 4, 150);

        assert_eq!(ledger.cash(), DEFAULT_STARTING_CASH - 1_000 + 600);
        let holding = &ledger.holdings()[&1];
        assert_eq!(holding.quantity, 6);
        assert_eq!(holding.avg_buy_price, 100.0);
    }

    #[test]
    fn test_oversell_closes_position() {
        let mut ledger = PortfolioLedger::new();
        ledger.record_transaction(1, Side::Buy, 10, 100);
        ledger.record_transaction(1, Side::Sell, 25, 150);

        // Full sale proceeds are credited even past the held quantity
        assert_eq!(ledger.cash(), DEFAULT_STARTING_CASH - 1_000 + 25 * 150);
        assert!(!ledger.holdings().contains_key(&1));
    }

    #[test]
    fn test_journal_is_newest_first_with_unique_ids() {
        let mut ledger = PortfolioLedger::new();
        ledger.record_transaction(1, Side::Buy, 10, 100);
        ledger.record_transaction(2, Side::Buy, 5, 200);

        let journal = ledger.transactions();
        assert_eq!(journal.len(), 2);
        assert_eq!(journal[0].item_id, 2);
        assert_eq!(journal[1].item_id, 1);
        assert_ne!(journal[0].id, journal[1].id);
    }

    #[test]
    fn test_reset_restores_starting_cash() {
        let mut ledger = PortfolioLedger::with_starting_cash(5_000_000);
        ledger.record_transaction(1, Side::Buy, 10, 100);
        ledger.reset();

        assert_eq!(ledger.cash(), 5_000_000);
        assert!(ledger.holdings().is_empty());
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_summary_values_at_net_high() {
        let mut ledger = PortfolioLedger::new();
        ledger.record_transaction(1, Side::Buy, 10, 100);

        let mut prices = HashMap::new();
        prices.insert(
            1,
            PriceQuote {
                high: Some(120),
                high_time: Some(0),
                low: Some(100),
                low_time: Some(0),
            },
        );
        let summary = ledger.summary(&prices);

        assert_eq!(summary.invested, 1_000.0);
        // tax(120) = 2, so each unit nets 118
        assert_eq!(summary.current_value, 1_180.0);
        assert_eq!(summary.unrealized_profit, 180.0);
    }

    #[test]
    fn test_summary_carries_unquoted_items_at_cost() {
        let mut ledger = PortfolioLedger::new();
        ledger.record_transaction(1, Side::Buy, 10, 100);

        let summary = ledger.summary(&HashMap::new());
        assert_eq!(summary.invested, 1_000.0);
        assert_eq!(summary.unrealized_profit, 0.0);
    }
}
