//! Momentum indicators.

use flip_core::traits::{Indicator, MultiOutputIndicator};
use serde::{Deserialize, Serialize};

use crate::moving_average::Ema;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes to flag
/// overbought or oversold conditions. The first `period` outputs are the
/// neutral 50 so the output stays index-aligned with the input; later
/// values use Wilder's smoothing of gains and losses.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

/// Guards the gain/loss ratio against a zero average loss.
const LOSS_EPSILON: f64 = 1e-10;

impl Rsi {
    /// Create a new RSI indicator. The common period is 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn ratio_to_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss.max(LOSS_EPSILON))
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![50.0; data.len()];
        }

        let period_f64 = self.period as f64;
        let mut result = vec![50.0; self.period];
        result.reserve(data.len() - self.period);

        // Deltas between consecutive points, split into gains and losses
        let deltas: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();

        // Seed the averages from the first full period of deltas
        let mut avg_gain = deltas[..self.period]
            .iter()
            .map(|&d| d.max(0.0))
            .sum::<f64>()
            / period_f64;
        let mut avg_loss = deltas[..self.period]
            .iter()
            .map(|&d| (-d).max(0.0))
            .sum::<f64>()
            / period_f64;
        result.push(Self::ratio_to_rsi(avg_gain, avg_loss));

        // Wilder's smoothing for the remainder
        for &delta in &deltas[self.period..] {
            avg_gain = (avg_gain * (period_f64 - 1.0) + delta.max(0.0)) / period_f64;
            avg_loss = (avg_loss * (period_f64 - 1.0) + (-delta).max(0.0)) / period_f64;
            result.push(Self::ratio_to_rsi(avg_gain, avg_loss));
        }

        result
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// Uses two EMAs to identify trend direction and momentum. Output is
/// index-aligned with the input, or empty when the input is shorter than
/// the slow period.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0, "Periods must be greater than 0");
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        if data.len() < self.slow_period {
            return vec![];
        }

        let fast = Ema::new(self.fast_period).calculate(data);
        let slow = Ema::new(self.slow_period).calculate(data);

        let macd_line: Vec<f64> = fast
            .iter()
            .zip(slow.iter())
            .map(|(&f, &s)| f - s)
            .collect();
        let signal_line = Ema::new(self.signal_period).calculate(&macd_line);

        macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(&macd, &signal)| MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.slow_period
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_short_input_is_all_neutral() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let result = rsi.calculate(&data);

        assert_eq!(result.len(), data.len());
        assert!(result.iter().all(|&v| v == 50.0));
    }

    #[test]
    fn test_rsi_uptrend_approaches_100() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let result = rsi.calculate(&data);

        assert_eq!(result.len(), data.len());
        // Warm-up prefix is neutral
        assert!(result[..14].iter().all(|&v| v == 50.0));
        // Pure gains, no losses
        assert!(result[14..].iter().all(|&v| v > 99.9));
    }

    #[test]
    fn test_rsi_downtrend_approaches_0() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let result = rsi.calculate(&data);

        assert!(result[14..].iter().all(|&v| v < 0.1));
    }

    #[test]
    fn test_rsi_bounded() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..100)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 15.0)
            .collect();
        let result = rsi.calculate(&data);

        assert_eq!(result.len(), data.len());
        assert!(result.iter().all(|&v| (0.0..=100.0).contains(&v)));
    }

    #[test]
    fn test_macd_insufficient_data() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..25).map(|i| i as f64).collect();
        assert!(macd.calculate(&data).is_empty());
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let macd = Macd::new();
        let data = vec![100.0; 40];
        let result = macd.calculate(&data);

        assert_eq!(result.len(), data.len());
        for out in result {
            assert!(out.macd.abs() < 1e-10);
            assert!(out.signal.abs() < 1e-10);
            assert!(out.histogram.abs() < 1e-10);
        }
    }

    #[test]
    fn test_macd_uptrend_is_positive() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 2.0).collect();
        let result = macd.calculate(&data);

        // Fast EMA tracks a rising series more closely than the slow EMA
        let last = result.last().unwrap();
        assert!(last.macd > 0.0);
    }
}
