//! Market-wide opportunity scanner.
//!
//! Walks the full item catalog against the latest price snapshot and 24h
//! aggregates, producing two ranked lists: active price dumps (panic
//! selling worth catching) and steady-state flips (spreads worth working).
//! Malformed or thinly traded items are skipped silently; the scanner
//! never fails on bad market data.

pub mod highlights;
pub mod watcher;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use flip_core::math;
use flip_core::types::{ItemMeta, PeriodStats, PriceQuote, StrategyFilter};

pub use highlights::{scan_highlights, HighlightEntry, MarketHighlights};
pub use watcher::{DumpAlert, PriceWatcher};

/// A quote older than this is too stale to act on.
pub const STALE_AFTER_SECS: i64 = 600;
/// Dumps below this 24h volume are too illiquid to exit.
pub const DUMP_MIN_VOLUME: i64 = 2_000;
/// Minimum percentage drop from the 24h average low to call a dump.
pub const DUMP_MIN_DROP_PCT: f64 = 3.0;
/// Minimum spread percentage for a dump to leave room for a rebound.
pub const DUMP_MIN_SPREAD_PCT: f64 = 2.0;
/// Assumed buy limit when the catalog does not list one.
const DEFAULT_LIMIT: i64 = 10_000;
/// Quantity cap used when projecting profit for one scan pass.
const SCAN_QUANTITY_CAP: i64 = 100;

/// What kind of opportunity a scan hit represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityLabel {
    /// Steady-state spread worth working
    Flip,
    /// Sharp drop with no price floor underneath
    PanicWick,
    /// Drop below the alchemy floor, downside capped
    SafeCrash,
}

impl std::fmt::Display for OpportunityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpportunityLabel::Flip => write!(f, "Flip"),
            OpportunityLabel::PanicWick => write!(f, "Panic Wick"),
            OpportunityLabel::SafeCrash => write!(f, "Safe Crash"),
        }
    }
}

/// One ranked scan hit.
///
/// `metric` and `secondary_metric` depend on the label: for dumps they are
/// the percentage drop and the full-buy-limit profit projection, for flips
/// the per-item net margin and the ROI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOpportunity {
    pub item: ItemMeta,
    pub price: PriceQuote,
    pub stats: PeriodStats,
    pub score: f64,
    pub label: OpportunityLabel,
    pub metric: f64,
    pub secondary_metric: f64,
}

/// Result of one full-market scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketScan {
    pub dumps: Vec<MarketOpportunity>,
    pub best_flips: Vec<MarketOpportunity>,
}

/// Scan the catalog for dumps and flips.
///
/// Items missing a price, stats, either quote side, or a 24h average low
/// are skipped, as are junk items priced below 2 gp. Strategy bounds are
/// applied on the instant low price and the 24h volume. An item can appear
/// in both lists. Both lists come back sorted by score, best first, with
/// ties keeping catalog order.
pub fn scan_market(
    items: &[ItemMeta],
    prices: &HashMap<u32, PriceQuote>,
    stats: &HashMap<u32, PeriodStats>,
    strategy: &StrategyFilter,
    now: i64,
) -> MarketScan {
    let mut scan = MarketScan::default();

    for item in items {
        let (Some(price), Some(stat)) = (prices.get(&item.id), stats.get(&item.id)) else {
            continue;
        };
        let (Some(low), Some(high)) = (price.low, price.high) else {
            continue;
        };
        if low == 0 || high == 0 {
            continue;
        }
        let Some(avg_low) = stat.avg_low_price else {
            continue;
        };
        if low < 2 {
            continue;
        }

        let volume = stat.daily_volume();
        if low < strategy.min_price || low > strategy.max_price {
            continue;
        }
        if volume < strategy.min_volume {
            continue;
        }

        if let Some(dump) = detect_dump(item, price, stat, strategy, now, low, high, avg_low) {
            scan.dumps.push(dump);
        }
        if let Some(flip) = detect_flip(item, price, stat, strategy, now, low, high) {
            scan.best_flips.push(flip);
        }
    }

    sort_by_score(&mut scan.dumps);
    sort_by_score(&mut scan.best_flips);
    scan
}

#[allow(clippy::too_many_arguments)]
fn detect_dump(
    item: &ItemMeta,
    price: &PriceQuote,
    stat: &PeriodStats,
    strategy: &StrategyFilter,
    now: i64,
    low: i64,
    high: i64,
    avg_low: i64,
) -> Option<MarketOpportunity> {
    // The dump has to be happening right now, on the sell side
    let low_time = price.low_time?;
    if now - low_time > STALE_AFTER_SECS {
        return None;
    }
    let volume = stat.daily_volume();
    if volume < strategy.min_volume.max(DUMP_MIN_VOLUME) {
        return None;
    }

    let drop = math::dump_score(low as f64, avg_low as f64);
    if drop <= DUMP_MIN_DROP_PCT {
        return None;
    }
    let spread_pct = (high - low) as f64 / low as f64 * 100.0;
    if spread_pct <= DUMP_MIN_SPREAD_PCT {
        return None;
    }

    // Conservative exit between the current high and the 24h average low
    let target_sell = (high as f64 * 0.7 + avg_low as f64 * 0.3).floor() as i64;
    let margin = math::margin(low, target_sell);
    let limit = item.limit.unwrap_or(DEFAULT_LIMIT);
    let potential_profit = margin.net * limit.min(SCAN_QUANTITY_CAP);

    let below_alch = item.high_alch.is_some_and(|alch| low < alch - 200);
    let worth_it = potential_profit > 50_000 || (below_alch && potential_profit > 10_000);
    if !worth_it {
        return None;
    }

    let score = drop * 2.0
        + (potential_profit as f64).log10() * 5.0
        + if below_alch { 50.0 } else { 0.0 }
        + if margin.roi > 30.0 { 10.0 } else { 0.0 };
    let label = if below_alch {
        OpportunityLabel::SafeCrash
    } else {
        OpportunityLabel::PanicWick
    };
    // Projection at the full buy limit rather than the scan cap
    let full_limit_profit =
        potential_profit as f64 * (limit as f64 / limit.min(SCAN_QUANTITY_CAP) as f64);

    Some(MarketOpportunity {
        item: item.clone(),
        price: *price,
        stats: *stat,
        score,
        label,
        metric: drop,
        secondary_metric: full_limit_profit,
    })
}

fn detect_flip(
    item: &ItemMeta,
    price: &PriceQuote,
    stat: &PeriodStats,
    strategy: &StrategyFilter,
    now: i64,
    low: i64,
    high: i64,
) -> Option<MarketOpportunity> {
    let last_trade = price.last_trade_time()?;
    if now - last_trade > STALE_AFTER_SECS {
        return None;
    }
    let volume = stat.daily_volume();
    if volume <= strategy.min_volume {
        return None;
    }

    let margin = math::margin(low, high);
    if margin.net <= 0 || margin.roi <= strategy.min_roi {
        return None;
    }

    let volatility = math::volatility(high as f64, low as f64);
    let score = math::flip_score(margin.net, margin.roi, volume, volatility);

    Some(MarketOpportunity {
        item: item.clone(),
        price: *price,
        stats: *stat,
        score,
        label: OpportunityLabel::Flip,
        metric: margin.net as f64,
        secondary_metric: margin.roi,
    })
}

fn sort_by_score(opportunities: &mut [MarketOpportunity]) {
    opportunities.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, name: &str, limit: Option<i64>, high_alch: Option<i64>) -> ItemMeta {
        ItemMeta {
            id,
            name: name.to_string(),
            limit,
            high_alch,
            members: false,
        }
    }

    fn quote(low: i64, high: i64, traded_at: i64) -> PriceQuote {
        PriceQuote {
            high: Some(high),
            high_time: Some(traded_at),
            low: Some(low),
            low_time: Some(traded_at),
        }
    }

    fn stat(avg_low: i64, avg_high: i64, volume: i64) -> PeriodStats {
        PeriodStats {
            avg_high_price: Some(avg_high),
            high_price_volume: volume / 2,
            avg_low_price: Some(avg_low),
            low_price_volume: volume - volume / 2,
        }
    }

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_skips_items_without_data() {
        let items = vec![
            item(1, "No price", None, None),
            item(2, "No stats", None, None),
        ];
        let mut prices = HashMap::new();
        prices.insert(2, quote(100, 120, NOW));
        let mut stats = HashMap::new();
        stats.insert(1, stat(100, 120, 10_000));

        let scan = scan_market(&items, &prices, &stats, &StrategyFilter::default(), NOW);
        assert!(scan.dumps.is_empty());
        assert!(scan.best_flips.is_empty());
    }

    #[test]
    fn test_skips_junk_prices() {
        let items = vec![item(1, "Junk", None, None)];
        let mut prices = HashMap::new();
        prices.insert(1, quote(1, 3, NOW));
        let mut stats = HashMap::new();
        stats.insert(1, stat(2, 3, 100_000));

        let scan = scan_market(&items, &prices, &stats, &StrategyFilter::default(), NOW);
        assert!(scan.best_flips.is_empty());
    }

    #[test]
    fn test_flip_detection() {
        let items = vec![item(1, "Steady earner", Some(1_000), None)];
        let mut prices = HashMap::new();
        prices.insert(1, quote(100, 120, NOW - 60));
        let mut stats = HashMap::new();
        stats.insert(1, stat(100, 120, 10_000));

        let scan = scan_market(&items, &prices, &stats, &StrategyFilter::default(), NOW);
        assert_eq!(scan.best_flips.len(), 1);
        let flip = &scan.best_flips[0];
        assert_eq!(flip.label, OpportunityLabel::Flip);
        // margin(100, 120): tax 2, net 18, roi 18%
        assert_eq!(flip.metric, 18.0);
        assert!((flip.secondary_metric - 18.0).abs() < 1e-9);
        assert!(flip.score > 0.0);
    }

    #[test]
    fn test_stale_quotes_produce_nothing() {
        let items = vec![item(1, "Stale", Some(1_000), None)];
        let mut prices = HashMap::new();
        prices.insert(1, quote(100, 120, NOW - STALE_AFTER_SECS - 1));
        let mut stats = HashMap::new();
        stats.insert(1, stat(130, 140, 10_000));

        let scan = scan_market(&items, &prices, &stats, &StrategyFilter::default(), NOW);
        assert!(scan.dumps.is_empty());
        assert!(scan.best_flips.is_empty());
    }

    #[test]
    fn test_dump_detection_panic_wick() {
        let items = vec![item(1, "Crashing", Some(1_000), None)];
        let mut prices = HashMap::new();
        prices.insert(1, quote(10_000, 15_000, NOW - 120));
        let mut stats = HashMap::new();
        stats.insert(1, stat(13_000, 15_500, 5_000));

        let scan = scan_market(&items, &prices, &stats, &StrategyFilter::default(), NOW);
        assert_eq!(scan.dumps.len(), 1);
        let dump = &scan.dumps[0];
        assert_eq!(dump.label, OpportunityLabel::PanicWick);
        // drop = (13000-10000)/13000 * 100
        assert!((dump.metric - 3_000.0 / 13_000.0 * 100.0).abs() < 1e-9);
        // target_sell = 15000*0.7 + 13000*0.3 = 14400; net = 14400-10000-288
        // potential = 4112 * 100, extrapolated to the 1000 limit
        assert!((dump.secondary_metric - 4_112_000.0).abs() < 1e-6);
        assert!(dump.score > 0.0);
    }

    #[test]
    fn test_dump_below_alch_is_safe_crash() {
        let items = vec![item(1, "Floored", Some(1_000), Some(20_000))];
        let mut prices = HashMap::new();
        prices.insert(1, quote(10_000, 15_000, NOW - 120));
        let mut stats = HashMap::new();
        stats.insert(1, stat(13_000, 15_500, 5_000));

        let scan = scan_market(&items, &prices, &stats, &StrategyFilter::default(), NOW);
        assert_eq!(scan.dumps[0].label, OpportunityLabel::SafeCrash);
    }

    #[test]
    fn test_dump_requires_liquidity() {
        let items = vec![item(1, "Illiquid", Some(1_000), None)];
        let mut prices = HashMap::new();
        prices.insert(1, quote(10_000, 15_000, NOW - 120));
        let mut stats = HashMap::new();
        stats.insert(1, stat(13_000, 15_500, 1_500));

        let scan = scan_market(&items, &prices, &stats, &StrategyFilter::default(), NOW);
        assert!(scan.dumps.is_empty());
    }

    #[test]
    fn test_strategy_bounds_applied() {
        let items = vec![item(1, "Too cheap", Some(1_000), None)];
        let mut prices = HashMap::new();
        prices.insert(1, quote(100, 120, NOW - 60));
        let mut stats = HashMap::new();
        stats.insert(1, stat(100, 120, 10_000));

        let strategy = StrategyFilter {
            min_price: 500,
            ..StrategyFilter::default()
        };
        let scan = scan_market(&items, &prices, &stats, &strategy, NOW);
        assert!(scan.best_flips.is_empty());
    }

    #[test]
    fn test_flips_sorted_by_score() {
        let items = vec![
            item(1, "Thin margin", Some(1_000), None),
            item(2, "Fat margin", Some(1_000), None),
        ];
        let mut prices = HashMap::new();
        prices.insert(1, quote(100, 104, NOW - 60));
        prices.insert(2, quote(100, 115, NOW - 60));
        let mut stats = HashMap::new();
        stats.insert(1, stat(100, 104, 10_000));
        stats.insert(2, stat(100, 115, 10_000));

        let scan = scan_market(&items, &prices, &stats, &StrategyFilter::default(), NOW);
        assert_eq!(scan.best_flips.len(), 2);
        assert_eq!(scan.best_flips[0].item.id, 2);
        assert!(scan.best_flips[0].score >= scan.best_flips[1].score);
    }

    #[test]
    fn test_min_roi_filters_flips() {
        let items = vec![item(1, "Low roi", Some(1_000), None)];
        let mut prices = HashMap::new();
        prices.insert(1, quote(100, 104, NOW - 60));
        let mut stats = HashMap::new();
        stats.insert(1, stat(100, 104, 10_000));

        // margin(100, 104): tax 2, net 2, roi 2%
        let strategy = StrategyFilter {
            min_roi: 5.0,
            ..StrategyFilter::default()
        };
        let scan = scan_market(&items, &prices, &stats, &strategy, NOW);
        assert!(scan.best_flips.is_empty());
    }

    #[test]
    fn test_label_display() {
        assert_eq!(OpportunityLabel::Flip.to_string(), "Flip");
        assert_eq!(OpportunityLabel::PanicWick.to_string(), "Panic Wick");
        assert_eq!(OpportunityLabel::SafeCrash.to_string(), "Safe Crash");
    }
}
