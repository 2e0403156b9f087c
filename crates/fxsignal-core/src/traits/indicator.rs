//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for technical indicators over a single price input.
///
/// `calculate` returns only defined values, aligned to the tail of the
/// input: `output[0]` corresponds to input index
/// `input.len() - output.len()`. Callers that need per-bar alignment pad
/// the head with undefined markers.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required to produce one value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }
}

/// Indicator over full OHLC input (not just close).
///
/// Same tail alignment convention as [`Indicator`].
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values from high/low/close data.
    fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required to produce one value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
