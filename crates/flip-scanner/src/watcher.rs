//! Watchlist price monitoring.
//!
//! Tracks a user-selected set of items and raises an alert when one of
//! them drops sharply below its 24h average. Alert delivery is the
//! caller's problem; this module only decides when an alert is due.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use flip_core::math;
use flip_core::types::{ItemMeta, PeriodStats, PriceQuote};

/// Minimum seconds between repeat alerts for the same item.
pub const ALERT_COOLDOWN_SECS: i64 = 300;

/// A dump alert for one watched item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpAlert {
    pub item_id: u32,
    pub item_name: String,
    /// Percent drop from the 24h average low
    pub drop_percent: f64,
    /// Current instant low price
    pub price: i64,
    pub timestamp: i64,
}

/// Stateful watchlist monitor.
///
/// `threshold` is the fractional drop that triggers an alert (0.05 means
/// a 5% drop). Per-item cooldown state lives here, so one watcher should
/// persist across polling cycles.
#[derive(Debug, Clone)]
pub struct PriceWatcher {
    threshold: f64,
    last_alert: HashMap<u32, i64>,
}

impl PriceWatcher {
    pub fn new(threshold: f64) -> Self {
        assert!(threshold > 0.0, "Threshold must be positive");
        Self {
            threshold,
            last_alert: HashMap::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Check the watchlist against the current snapshot.
    ///
    /// Returns one alert per watched item whose drop meets the threshold
    /// and whose cooldown has elapsed. Items without usable data are
    /// skipped.
    pub fn check(
        &mut self,
        now: i64,
        watchlist: &[ItemMeta],
        prices: &HashMap<u32, PriceQuote>,
        stats: &HashMap<u32, PeriodStats>,
    ) -> Vec<DumpAlert> {
        let mut alerts = Vec::new();

        for item in watchlist {
            let (Some(price), Some(stat)) = (prices.get(&item.id), stats.get(&item.id)) else {
                continue;
            };
            let (Some(low), Some(avg_low)) = (price.low, stat.avg_low_price) else {
                continue;
            };
            if low <= 0 || avg_low <= 0 {
                continue;
            }

            let drop_percent = math::dump_score(low as f64, avg_low as f64);
            if drop_percent < self.threshold * 100.0 {
                continue;
            }
            if let Some(&last) = self.last_alert.get(&item.id) {
                if now - last < ALERT_COOLDOWN_SECS {
                    continue;
                }
            }

            self.last_alert.insert(item.id, now);
            alerts.push(DumpAlert {
                item_id: item.id,
                item_name: item.name.clone(),
                drop_percent,
                price: low,
                timestamp: now,
            });
        }

        alerts
    }

    /// Forget all cooldown state.
    pub fn reset(&mut self) {
        self.last_alert.clear();
    }
}
