//! Volatility indicators.

use flip_core::traits::MultiOutputIndicator;
use serde::{Deserialize, Serialize};

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerOutput {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Bollinger Bands.
///
/// A moving average with bands at a multiple of the population standard
/// deviation. Output is index-aligned with the input: positions before
/// the first full window pass the raw price through on all three bands.
/// Empty when the input is shorter than the period.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    multiplier: f64,
}

impl BollingerBands {
    /// Create Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with a custom period and band width.
    pub fn with_params(period: usize, multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(multiplier > 0.0, "Multiplier must be positive");
        Self { period, multiplier }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BollingerOutput> {
        if data.len() < self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;
        let mut result = Vec::with_capacity(data.len());

        // Warm-up: the raw price on all three bands
        for &price in &data[..self.period - 1] {
            result.push(BollingerOutput {
                upper: price,
                middle: price,
                lower: price,
            });
        }

        for window in data.windows(self.period) {
            let mean: f64 = window.iter().sum::<f64>() / period_f64;
            let variance: f64 =
                window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f64;
            let band = variance.sqrt() * self.multiplier;
            result.push(BollingerOutput {
                upper: mean + band,
                middle: mean,
                lower: mean - band,
            });
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "BollingerBands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_insufficient_data() {
        let bb = BollingerBands::with_params(20, 2.0);
        let data: Vec<f64> = (0..19).map(|i| i as f64).collect();
        assert!(bb.calculate(&data).is_empty());
    }

    #[test]
    fn test_bollinger_warmup_passes_price_through() {
        let bb = BollingerBands::with_params(3, 2.0);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = bb.calculate(&data);

        assert_eq!(result.len(), data.len());
        for i in 0..2 {
            assert_eq!(result[i].upper, data[i]);
            assert_eq!(result[i].middle, data[i]);
            assert_eq!(result[i].lower, data[i]);
        }
    }

    #[test]
    fn test_bollinger_band_values() {
        let bb = BollingerBands::with_params(3, 2.0);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = bb.calculate(&data);

        // Window [1,2,3]: mean 2, population stddev sqrt(2/3)
        let sd = (2.0_f64 / 3.0).sqrt();
        assert!((result[2].middle - 2.0).abs() < 1e-10);
        assert!((result[2].upper - (2.0 + 2.0 * sd)).abs() < 1e-10);
        assert!((result[2].lower - (2.0 - 2.0 * sd)).abs() < 1e-10);
    }

    #[test]
    fn test_bollinger_flat_series_collapses_bands() {
        let bb = BollingerBands::with_params(5, 2.0);
        let data = vec![250.0; 10];
        let result = bb.calculate(&data);

        for out in result {
            assert_eq!(out.upper, 250.0);
            assert_eq!(out.middle, 250.0);
            assert_eq!(out.lower, 250.0);
        }
    }
}
