//! Trend-strength indicators.

use fxsignal_core::traits::MultiOutputIndicator;
use serde::{Deserialize, Serialize};

/// One ADX observation with its directional components.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AdxOutput {
    /// Average directional index (0..100, strength not direction)
    pub adx: f64,
    /// Smoothed positive directional indicator (DI+)
    pub di_plus: f64,
    /// Smoothed negative directional indicator (DI-)
    pub di_minus: f64,
}

/// Average Directional Index (ADX).
///
/// Standard Wilder directional-movement calculation:
/// 1. +DM / -DM and true range from consecutive bars
/// 2. Wilder-smooth +DM, -DM and TR over `period` bars
/// 3. DI+ = smoothed +DM / smoothed TR * 100 (and DI- likewise)
/// 4. DX = |DI+ - DI-| / (DI+ + DI-) * 100
/// 5. ADX = Wilder-smoothed DX over `period` values
///
/// The first output corresponds to input index `2 * period - 1`: one bar
/// to prime the previous-bar state, `period - 1` more for the DM/TR seed,
/// and `period` DX values for the ADX seed.
#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
}

impl Adx {
    /// Create a new ADX indicator. The signal rule uses period 14.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn dm_tr(prev_high: f64, prev_low: f64, prev_close: f64, high: f64, low: f64) -> (f64, f64, f64) {
        let up_move = high - prev_high;
        let down_move = prev_low - low;

        let plus_dm = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let minus_dm = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };

        let tr = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());

        (plus_dm, minus_dm, tr)
    }

    fn di_dx(smoothed_plus: f64, smoothed_minus: f64, smoothed_tr: f64) -> (f64, f64, f64) {
        let di_plus = if smoothed_tr > 0.0 {
            smoothed_plus / smoothed_tr * 100.0
        } else {
            0.0
        };
        let di_minus = if smoothed_tr > 0.0 {
            smoothed_minus / smoothed_tr * 100.0
        } else {
            0.0
        };
        let di_sum = di_plus + di_minus;
        let dx = if di_sum > 0.0 {
            (di_plus - di_minus).abs() / di_sum * 100.0
        } else {
            0.0
        };
        (di_plus, di_minus, dx)
    }
}

impl MultiOutputIndicator for Adx {
    type Output = AdxOutput;

    fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<AdxOutput> {
        let len = high.len().min(low.len()).min(close.len());
        if len < 2 * self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;

        // Seed: sum of the first `period` DM/TR observations (bars 1..=period).
        let mut smoothed_plus = 0.0;
        let mut smoothed_minus = 0.0;
        let mut smoothed_tr = 0.0;
        for i in 1..=self.period {
            let (plus_dm, minus_dm, tr) =
                Self::dm_tr(high[i - 1], low[i - 1], close[i - 1], high[i], low[i]);
            smoothed_plus += plus_dm;
            smoothed_minus += minus_dm;
            smoothed_tr += tr;
        }

        // Seed ADX with the simple average of the first `period` DX values,
        // the first of which comes from the seeded DM/TR sums themselves.
        let (_, _, first_dx) = Self::di_dx(smoothed_plus, smoothed_minus, smoothed_tr);
        let mut dx_sum = first_dx;
        let mut dx_count = 1usize;
        let mut adx = 0.0;

        let mut result = Vec::with_capacity(len - 2 * self.period + 1);

        for i in (self.period + 1)..len {
            let (plus_dm, minus_dm, tr) =
                Self::dm_tr(high[i - 1], low[i - 1], close[i - 1], high[i], low[i]);

            // Wilder smoothing: new = prev - prev/N + current
            smoothed_plus = smoothed_plus - smoothed_plus / period_f64 + plus_dm;
            smoothed_minus = smoothed_minus - smoothed_minus / period_f64 + minus_dm;
            smoothed_tr = smoothed_tr - smoothed_tr / period_f64 + tr;

            let (di_plus, di_minus, dx) = Self::di_dx(smoothed_plus, smoothed_minus, smoothed_tr);

            if dx_count < self.period {
                dx_sum += dx;
                dx_count += 1;
                if dx_count == self.period {
                    adx = dx_sum / period_f64;
                    result.push(AdxOutput {
                        adx,
                        di_plus,
                        di_minus,
                    });
                }
            } else {
                adx = (adx * (period_f64 - 1.0) + dx) / period_f64;
                result.push(AdxOutput {
                    adx,
                    di_plus,
                    di_minus,
                });
            }
        }

        result
    }

    fn period(&self) -> usize {
        2 * self.period
    }

    fn name(&self) -> &str {
        "ADX"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize, slope: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let close: Vec<f64> = (0..n).map(|i| 100.0 + i as f64 * slope).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 0.5).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 0.5).collect();
        (high, low, close)
    }

    #[test]
    fn test_adx_alignment() {
        let (high, low, close) = ramp(40, 1.0);
        let result = Adx::new(14).calculate(&high, &low, &close);

        // First value at input index 2*14 - 1 = 27
        assert_eq!(result.len(), 40 - 28 + 1);
    }

    #[test]
    fn test_adx_insufficient_data() {
        let (high, low, close) = ramp(27, 1.0);
        assert!(Adx::new(14).calculate(&high, &low, &close).is_empty());
    }

    #[test]
    fn test_adx_strong_uptrend() {
        // Every bar moves up: -DM is always zero, so DX = 100 at every
        // step and the smoothed ADX is exactly 100.
        let (high, low, close) = ramp(60, 1.0);
        let result = Adx::new(14).calculate(&high, &low, &close);

        let last = result.last().unwrap();
        assert!((last.adx - 100.0).abs() < 1e-9);
        assert!(last.di_plus > 0.0);
        assert!(last.di_minus.abs() < 1e-12);
    }

    #[test]
    fn test_adx_strong_downtrend_is_trend_strength_not_direction() {
        let (high, low, close) = ramp(60, -1.0);
        let result = Adx::new(14).calculate(&high, &low, &close);

        let last = result.last().unwrap();
        assert!((last.adx - 100.0).abs() < 1e-9);
        assert!(last.di_minus > 0.0);
        assert!(last.di_plus.abs() < 1e-12);
    }

    #[test]
    fn test_adx_flat_series_is_zero() {
        let close = vec![100.0; 60];
        let high = close.clone();
        let low = close.clone();
        let result = Adx::new(14).calculate(&high, &low, &close);

        for out in &result {
            assert_eq!(out.adx, 0.0);
            assert_eq!(out.di_plus, 0.0);
            assert_eq!(out.di_minus, 0.0);
        }
    }

    #[test]
    fn test_adx_bounded() {
        let close: Vec<f64> = (0..80)
            .map(|i| 1.10 + (i as f64 * 0.7).sin() * 0.02)
            .collect();
        let high: Vec<f64> = close.iter().map(|c| c + 0.005).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 0.005).collect();
        let result = Adx::new(14).calculate(&high, &low, &close);

        assert!(!result.is_empty());
        for out in &result {
            assert!(out.adx >= 0.0 && out.adx <= 100.0);
            assert!(out.di_plus >= 0.0);
            assert!(out.di_minus >= 0.0);
        }
    }
}
