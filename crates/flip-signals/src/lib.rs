//! Rule-based trading signal engine.
//!
//! Evaluates one item's price history into a BUY/SELL/HOLD/WAIT call by
//! combining RSI, a short/long SMA crossover, and spread volatility into
//! a 0-100 score around a neutral 50. Thin history always comes back as
//! WAIT rather than an error.

use flip_core::math;
use flip_core::traits::Indicator;
use flip_core::types::{
    IndicatorSnapshot, RiskProfile, SignalAction, SignalConfig, SignalResult, TimeSeriesPoint,
    Trend,
};
use flip_indicators::{Rsi, Sma};

/// Raw history shorter than this cannot be evaluated.
pub const MIN_HISTORY_POINTS: usize = 50;
/// Minimum usable mid-prices after filtering out one-sided buckets.
pub const MIN_USABLE_POINTS: usize = 30;

const RSI_PERIOD: usize = 14;
const SHORT_SMA_PERIOD: usize = 8;
const LONG_SMA_PERIOD: usize = 20;
/// Spread volatility above this is worth mentioning in the reasoning.
const VOLATILITY_NOTE_LEVEL: f64 = 2.0;

/// Evaluate a price history into a trading signal.
///
/// History buckets missing either side, or with a non-positive midpoint,
/// are dropped before the indicators run. Volatility comes from the most
/// recent raw bucket with absent sides treated as zero.
pub fn evaluate(history: &[TimeSeriesPoint], config: &SignalConfig) -> SignalResult {
    if history.len() < MIN_HISTORY_POINTS {
        return SignalResult::insufficient_data();
    }
    let mids: Vec<f64> = history
        .iter()
        .filter_map(|p| p.mid_price())
        .filter(|&m| m > 0.0)
        .collect();
    if mids.len() < MIN_USABLE_POINTS {
        return SignalResult::insufficient_data();
    }

    // RSI output is index-aligned with its input, so last() always exists
    let rsi = *Rsi::new(RSI_PERIOD).calculate(&mids).last().unwrap_or(&50.0);
    let short_sma = *Sma::new(SHORT_SMA_PERIOD)
        .calculate(&mids)
        .last()
        .unwrap_or(&0.0);
    let long_sma = *Sma::new(LONG_SMA_PERIOD)
        .calculate(&mids)
        .last()
        .unwrap_or(&0.0);
    let current = *mids.last().unwrap_or(&0.0);

    let latest = history.last().copied().unwrap_or_default();
    let volatility = math::volatility(
        latest.avg_high_price.unwrap_or(0) as f64,
        latest.avg_low_price.unwrap_or(0) as f64,
    );

    let mut score: f64 = 50.0;
    let mut reasoning = Vec::new();

    let (buy_threshold, sell_threshold) = config.risk_profile.rsi_thresholds();
    if rsi < buy_threshold {
        score += 25.0;
        reasoning.push("RSI oversold".to_string());
    } else if rsi > sell_threshold {
        score -= 25.0;
        reasoning.push("RSI overbought".to_string());
    }

    // Strict comparison: a tie reads as bearish
    let bullish = short_sma > long_sma;
    if bullish {
        score += 15.0;
        if current > short_sma {
            score += 5.0;
        }
    } else {
        score -= 15.0;
        if current < short_sma {
            score -= 5.0;
        }
    }

    if volatility > VOLATILITY_NOTE_LEVEL {
        reasoning.push("high volatility".to_string());
        if config.risk_profile == RiskProfile::Low {
            score -= 10.0;
        } else {
            score += 10.0;
        }
    }

    // The components can compose past the ends of the scale
    let score = score.clamp(0.0, 100.0);
    let confidence = ((score - 50.0).abs() * 2.0).clamp(0.0, 100.0);
    let action = if score >= 75.0 {
        SignalAction::Buy
    } else if score <= 25.0 {
        SignalAction::Sell
    } else {
        SignalAction::Hold
    };

    SignalResult {
        action,
        score,
        confidence,
        reasoning,
        indicators: IndicatorSnapshot {
            rsi,
            trend: if bullish { Trend::Bullish } else { Trend::Bearish },
            volatility,
        },
    }
}
