//! Indicator trait definitions.

use crate::error::FlipError;

/// Trait for technical indicators over a price series.
///
/// Implementations are pure: short input yields a short (possibly empty)
/// output rather than an error, so pipelines degrade gracefully on thin
/// market history. `validate_data` is the strict alternative for callers
/// that want to reject thin input up front.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), FlipError> {
        if data.len() < self.period() {
            return Err(FlipError::Validation(format!(
                "{} requires {} data points, got {}",
                self.name(),
                self.period(),
                data.len()
            )));
        }
        Ok(())
    }
}

/// Multi-output indicator (e.g. Bollinger Bands, MACD).
///
/// Some indicators produce multiple related values per point.
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), FlipError> {
        if data.len() < self.period() {
            return Err(FlipError::Validation(format!(
                "{} requires {} data points, got {}",
                self.name(),
                self.period(),
                data.len()
            )));
        }
        Ok(())
    }
}
