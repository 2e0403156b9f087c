//! Momentum indicators.

use fxsignal_core::traits::Indicator;

/// Relative Strength Index (RSI).
///
/// Average gain vs. average loss over a trailing window with Wilder
/// smoothing; `RSI = 100 - 100 / (1 + avg_gain / avg_loss)`, and 100 when
/// the average loss is zero. The first output corresponds to input index
/// `period` (one change per consecutive pair of prices).
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator. The signal rule uses period 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate using Wilder's smoothing method.
    fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
        if values.len() < period {
            return vec![];
        }

        let mut result = Vec::with_capacity(values.len() - period + 1);
        let period_f64 = period as f64;

        // Initial average
        let mut avg: f64 = values[..period].iter().sum::<f64>() / period_f64;
        result.push(avg);

        // Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period
        for &value in &values[period..] {
            avg = (avg * (period_f64 - 1.0) + value) / period_f64;
            result.push(avg);
        }

        result
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        // Price changes
        let mut gains = Vec::with_capacity(data.len() - 1);
        let mut losses = Vec::with_capacity(data.len() - 1);

        for i in 1..data.len() {
            let change = data[i] - data[i - 1];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let avg_gains = Self::wilder_smooth(&gains, self.period);
        let avg_losses = Self::wilder_smooth(&losses, self.period);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| {
                if loss == 0.0 {
                    100.0
                } else {
                    100.0 - (100.0 / (1.0 + gain / loss))
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_bounded() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..60)
            .map(|i| 1.10 + (i as f64 * 0.5).sin() * 0.01)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), 60 - 15 + 1);

        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_monotonic_increase_converges_to_100() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..60).map(|i| 1.0 + i as f64 * 0.001).collect();
        let result = rsi.calculate(&data);

        // No losses at all, so every defined value is exactly 100.
        assert!(!result.is_empty());
        for value in &result {
            assert!((value - 100.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_rsi_monotonic_decrease_converges_to_0() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..60).map(|i| 2.0 - i as f64 * 0.001).collect();
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        for value in &result {
            assert!(value.abs() < 1e-10);
        }
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let rsi = Rsi::new(14);
        let data = vec![1.0; 14];
        assert!(rsi.calculate(&data).is_empty());
    }

    #[test]
    fn test_rsi_reference_value() {
        // Changes are [-0.5, +1.5] over a period-2 window:
        // avg_gain = 0.75, avg_loss = 0.25, RS = 3, RSI = 100 - 100/4 = 75.
        let rsi = Rsi::new(2);
        let data = vec![10.0, 9.5, 11.0];
        let result = rsi.calculate(&data);

        assert_eq!(result.len(), 1);
        assert!((result[0] - 75.0).abs() < 1e-10);
    }
}
