//! Exchange tax, margin, and volatility arithmetic.
//!
//! All functions here are pure and total: degenerate inputs (zero prices,
//! negative spreads) fall back to zero rather than erroring, so callers
//! never need to guard a division themselves.

use serde::{Deserialize, Serialize};

/// Tax rate applied to the total sell price.
pub const TAX_RATE: f64 = 0.02;
/// Tax is capped at 5M per item sold.
pub const TAX_CAP: i64 = 5_000_000;
/// Sales below this price are tax free.
pub const TAX_FREE_THRESHOLD: i64 = 50;

/// Margin breakdown for a single buy/sell pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    /// Tax charged on the sell side
    pub tax: i64,
    /// Net profit per item after tax
    pub net: i64,
    /// Return on investment, percent of the buy price
    pub roi: f64,
}

/// Calculate the exchange tax for a given sell price.
///
/// Returns 0 below the tax-free threshold, otherwise 2% of the sell
/// price rounded down, capped at 5M.
pub fn tax(sell_price: i64) -> i64 {
    if sell_price < TAX_FREE_THRESHOLD {
        return 0;
    }
    let raw = (sell_price as f64 * TAX_RATE).floor() as i64;
    raw.min(TAX_CAP)
}

/// Calculate tax, net profit, and ROI for a buy/sell pair.
pub fn margin(buy: i64, sell: i64) -> Margin {
    let tax = tax(sell);
    let net = sell - buy - tax;
    let roi = if buy > 0 {
        net as f64 / buy as f64 * 100.0
    } else {
        0.0
    };
    Margin { tax, net, roi }
}

/// Spread volatility scaled to 0-100: a 1% spread scores 10, 10%+ scores 100.
pub fn volatility(high: f64, low: f64) -> f64 {
    if low <= 0.0 {
        return 0.0;
    }
    let spread_ratio = (high - low) / low;
    (spread_ratio * 1000.0).min(100.0)
}

/// Severity of a price drop relative to the 24h average low.
///
/// Roughly the percentage drop: a 50% crash scores 50.
pub fn dump_score(current_low: f64, avg_low: f64) -> f64 {
    if avg_low <= 0.0 {
        return 0.0;
    }
    let drop = (avg_low - current_low) / avg_low;
    if drop > 0.0 {
        drop * 100.0
    } else {
        0.0
    }
}

/// Composite opportunity score for a steady-state flip.
///
/// Balances absolute profit, ROI (capped to filter outliers), log-scaled
/// volume, and a penalty for extreme volatility.
pub fn flip_score(net_profit: i64, roi: f64, volume_24h: i64, volatility: f64) -> f64 {
    if net_profit <= 0 || volume_24h < 10 {
        return 0.0;
    }

    let vol_score = (volume_24h as f64).log10();
    let roi_score = roi.min(50.0);
    let risk_penalty = if volatility > 50.0 {
        (volatility - 50.0) * 2.0
    } else {
        0.0
    };

    net_profit as f64 * 0.0001 + roi_score * 10.0 + vol_score * 5.0 - risk_penalty
}

/// Format a gp amount with B/M/k suffixes for display.
pub fn format_gp(amount: i64) -> String {
    let abs = amount.abs();
    if abs >= 1_000_000_000 {
        format!("{:.2}B", amount as f64 / 1e9)
    } else if abs >= 1_000_000 {
        format!("{:.2}M", amount as f64 / 1e6)
    } else if abs >= 10_000 {
        format!("{:.1}k", amount as f64 / 1e3)
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_thresholds() {
        assert_eq!(tax(49), 0);
        assert_eq!(tax(50), 1);
        assert_eq!(tax(100), 2);
        assert_eq!(tax(10_000), 200);
    }

    #[test]
    fn test_tax_cap() {
        // 2% of 250M is exactly the cap
        assert_eq!(tax(250_000_000), 5_000_000);
        assert_eq!(tax(250_000_001), 5_000_000);
        assert_eq!(tax(1_000_000_000), 5_000_000);
    }

    #[test]
    fn test_margin_identity() {
        for (buy, sell) in [(100, 150), (1, 49), (5_000, 5_100), (1_000_000, 1_100_000)] {
            let m = margin(buy, sell);
            assert_eq!(m.net, sell - buy - tax(sell));
            assert!((m.roi - m.net as f64 / buy as f64 * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_margin_zero_buy() {
        let m = margin(0, 100);
        assert_eq!(m.roi, 0.0);
        assert_eq!(m.net, 100 - tax(100));
    }

    #[test]
    fn test_volatility_scaling() {
        assert!((volatility(101.0, 100.0) - 10.0).abs() < 1e-9);
        assert!((volatility(105.0, 100.0) - 50.0).abs() < 1e-9);
        assert!((volatility(110.0, 100.0) - 100.0).abs() < 1e-9);
        // Capped at 100
        assert_eq!(volatility(200.0, 100.0), 100.0);
        // Degenerate low
        assert_eq!(volatility(100.0, 0.0), 0.0);
        assert_eq!(volatility(100.0, -5.0), 0.0);
    }

    #[test]
    fn test_dump_score() {
        assert!((dump_score(80.0, 100.0) - 20.0).abs() < 1e-9);
        assert!((dump_score(50.0, 100.0) - 50.0).abs() < 1e-9);
        // Price above average is not a dump
        assert_eq!(dump_score(120.0, 100.0), 0.0);
        assert_eq!(dump_score(80.0, 0.0), 0.0);
    }

    #[test]
    fn test_flip_score_gates() {
        assert_eq!(flip_score(-5, 10.0, 1_000, 0.0), 0.0);
        assert_eq!(flip_score(0, 10.0, 1_000, 0.0), 0.0);
        assert_eq!(flip_score(100, 10.0, 9, 0.0), 0.0);
        assert!(flip_score(100, 10.0, 1_000, 0.0) > 0.0);
    }

    #[test]
    fn test_flip_score_volatility_penalty() {
        let calm = flip_score(100, 10.0, 1_000, 40.0);
        let wild = flip_score(100, 10.0, 1_000, 80.0);
        assert!(wild < calm);
        assert!((calm - wild - 60.0).abs() < 1e-9); // (80-50)*2
    }

    #[test]
    fn test_format_gp() {
        assert_eq!(format_gp(999), "999");
        assert_eq!(format_gp(12_500), "12.5k");
        assert_eq!(format_gp(2_500_000), "2.50M");
        assert_eq!(format_gp(5_250_000_000), "5.25B");
    }
}
