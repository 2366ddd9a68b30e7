//! Market highlight boards.
//!
//! Curated leaderboards over the live snapshot: biggest movers, highest
//! achievable profits, alchemy margins. Unlike the opportunity scanner
//! these are purely informational and apply only broad liquidity filters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use flip_core::math;
use flip_core::types::{ItemMeta, PeriodStats, PriceQuote};

use crate::STALE_AFTER_SECS;

/// Items cheaper than this are noise on every board.
pub const MIN_PRICE: i64 = 500;
/// Minimum 24h volume to appear on a board.
pub const MIN_VOLUME: i64 = 50;
/// Spreads wider than this are stale order books, not opportunities.
pub const MAX_SPREAD_PCT: f64 = 50.0;
/// Entries per board.
pub const BOARD_SIZE: usize = 8;
/// Cost of the nature rune consumed per alchemy cast.
pub const NATURE_RUNE_COST: i64 = 100;
/// Buy limits reset every 4 hours, so six windows fit in a day.
const LIMIT_WINDOWS_PER_DAY: i64 = 6;

/// One row on a highlight board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightEntry {
    pub item_id: u32,
    pub name: String,
    pub high: i64,
    pub low: i64,
    /// Percent change of the instant high vs the 24h average high
    pub change_24h: f64,
    /// Net margin per item after tax
    pub net_margin: i64,
    /// Margin times the quantity actually tradable in a day
    pub achievable_profit: i64,
    /// High alch value minus cost and nature rune, when alchable
    pub alch_profit: Option<i64>,
    pub daily_volume: i64,
    pub members: bool,
}

/// The full set of highlight boards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketHighlights {
    pub top_gainers: Vec<HighlightEntry>,
    pub top_losers: Vec<HighlightEntry>,
    pub high_volume: Vec<HighlightEntry>,
    pub most_profitable: Vec<HighlightEntry>,
    pub most_profitable_f2p: Vec<HighlightEntry>,
    pub most_expensive: Vec<HighlightEntry>,
    pub profitable_alchs: Vec<HighlightEntry>,
}

/// Build all highlight boards from the current snapshot.
pub fn scan_highlights(
    items: &[ItemMeta],
    prices: &HashMap<u32, PriceQuote>,
    stats: &HashMap<u32, PeriodStats>,
    now: i64,
) -> MarketHighlights {
    let mut entries: Vec<HighlightEntry> = Vec::new();

    for item in items {
        let (Some(price), Some(stat)) = (prices.get(&item.id), stats.get(&item.id)) else {
            continue;
        };
        let (Some(low), Some(high)) = (price.low, price.high) else {
            continue;
        };
        let Some(last_trade) = price.last_trade_time() else {
            continue;
        };
        if now - last_trade > STALE_AFTER_SECS || high < MIN_PRICE || low <= 0 {
            continue;
        }
        let volume = stat.daily_volume();
        if volume < MIN_VOLUME {
            continue;
        }
        let spread_pct = (high - low) as f64 / low as f64 * 100.0;
        if spread_pct > MAX_SPREAD_PCT {
            continue;
        }

        let change_24h = match stat.avg_high_price {
            Some(avg) if avg > 0 => (high - avg) as f64 / avg as f64 * 100.0,
            _ => 0.0,
        };
        let margin = math::margin(low, high);
        let tradable = item
            .limit
            .map_or(volume, |limit| volume.min(limit * LIMIT_WINDOWS_PER_DAY));
        let alch_profit = item
            .high_alch
            .map(|alch| alch - low - NATURE_RUNE_COST);

        entries.push(HighlightEntry {
            item_id: item.id,
            name: item.name.clone(),
            high,
            low,
            change_24h,
            net_margin: margin.net,
            achievable_profit: margin.net * tradable,
            alch_profit,
            daily_volume: volume,
            members: item.members,
        });
    }

    MarketHighlights {
        top_gainers: top_by(&entries, |e| e.change_24h > 0.0, |e| e.change_24h),
        top_losers: top_by(&entries, |e| e.change_24h < 0.0, |e| -e.change_24h),
        high_volume: top_by(
            &entries,
            |e| e.net_margin > 0,
            |e| e.daily_volume as f64,
        ),
        most_profitable: top_by(
            &entries,
            |e| e.achievable_profit > 0,
            |e| e.achievable_profit as f64,
        ),
        most_profitable_f2p: top_by(
            &entries,
            |e| e.achievable_profit > 0 && !e.members,
            |e| e.achievable_profit as f64,
        ),
        most_expensive: top_by(&entries, |_| true, |e| e.high as f64),
        profitable_alchs: top_by(
            &entries,
            |e| e.alch_profit.is_some_and(|p| p > 0),
            |e| e.alch_profit.unwrap_or(0) as f64,
        ),
    }
}

fn top_by(
    entries: &[HighlightEntry],
    admit: impl Fn(&HighlightEntry) -> bool,
    key: impl Fn(&HighlightEntry) -> f64,
) -> Vec<HighlightEntry> {
    let mut board: Vec<HighlightEntry> = entries.iter().filter(|e| admit(e)).cloned().collect();
    board.sort_by(|a, b| {
        key(b)
            .partial_cmp(&key(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    board.truncate(BOARD_SIZE);
    board
}
