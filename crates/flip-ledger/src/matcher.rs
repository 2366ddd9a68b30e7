//! FIFO matching of raw trades into completed flips.

use std::collections::{HashMap, VecDeque};

use flip_core::math;
use flip_core::types::{MatchedFlip, Trade};

/// An open buy lot awaiting a matching sell.
#[derive(Debug, Clone)]
struct OpenLot {
    quantity: i64,
    unit_cost: i64,
    trade_id: String,
}

/// Match a raw trade log into completed flips.
///
/// Trades are processed in timestamp order with a FIFO queue of open buy
/// lots per item. Manually logged completed entries (both prices set,
/// nonzero profit) pass straight through without touching the queues. A
/// sell that exceeds the open lots has its unmatched remainder dropped:
/// with no cost basis there is nothing honest to report. Output is
/// newest first.
pub fn match_trades(trades: &[Trade]) -> Vec<MatchedFlip> {
    let mut ordered: Vec<&Trade> = trades.iter().collect();
    ordered.sort_by_key(|t| t.timestamp);

    let mut open_lots: HashMap<u32, VecDeque<OpenLot>> = HashMap::new();
    let mut flips = Vec::new();

    for trade in ordered {
        if trade.is_completed_entry() {
            flips.push(MatchedFlip {
                item_id: trade.item_id,
                quantity: trade.quantity,
                avg_buy_price: trade.buy_price as f64,
                sell_price: trade.sell_price,
                profit: trade.profit,
                timestamp: trade.timestamp,
                buy_trade_ids: vec![trade.id.clone()],
                sell_trade_ids: vec![trade.id.clone()],
            });
        } else if trade.is_buy() {
            open_lots
                .entry(trade.item_id)
                .or_default()
                .push_back(OpenLot {
                    quantity: trade.quantity,
                    unit_cost: trade.buy_price,
                    trade_id: trade.id.clone(),
                });
        } else if trade.is_sell() {
            if let Some(flip) = consume_lots(&mut open_lots, trade) {
                flips.push(flip);
            }
        }
    }

    flips.sort_by_key(|f| std::cmp::Reverse(f.timestamp));
    flips
}

fn consume_lots(
    open_lots: &mut HashMap<u32, VecDeque<OpenLot>>,
    sell: &Trade,
) -> Option<MatchedFlip> {
    let queue = open_lots.get_mut(&sell.item_id)?;

    let mut remaining = sell.quantity;
    let mut total_cost: i64 = 0;
    let mut buy_trade_ids = Vec::new();

    while remaining > 0 {
        let Some(front) = queue.front_mut() else {
            break;
        };
        let taken = front.quantity.min(remaining);
        total_cost += taken * front.unit_cost;
        buy_trade_ids.push(front.trade_id.clone());
        front.quantity -= taken;
        remaining -= taken;
        if front.quantity == 0 {
            queue.pop_front();
        }
    }

    let matched = sell.quantity - remaining;
    if matched == 0 {
        return None;
    }

    let tax = math::tax(sell.sell_price) * matched;
    let revenue = matched * sell.sell_price;
    Some(MatchedFlip {
        item_id: sell.item_id,
        quantity: matched,
        avg_buy_price: total_cost as f64 / matched as f64,
        sell_price: sell.sell_price,
        profit: revenue - total_cost - tax,
        timestamp: sell.timestamp,
        buy_trade_ids,
        sell_trade_ids: vec![sell.id.clone()],
    })
}
