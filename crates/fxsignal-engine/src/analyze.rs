//! Indicator-row computation over a bar series.

use fxsignal_core::traits::{Indicator, MultiOutputIndicator};
use fxsignal_core::types::{Bar, BarSeries};
use fxsignal_indicators::{Adx, Ema, Rsi};
use serde::{Deserialize, Serialize};

/// Fast EMA period of the crossover rule.
pub const EMA_FAST_PERIOD: usize = 9;
/// Slow EMA period of the crossover rule.
pub const EMA_SLOW_PERIOD: usize = 21;
/// RSI lookback.
pub const RSI_PERIOD: usize = 14;
/// ADX lookback (seed window is twice this).
pub const ADX_PERIOD: usize = 14;

/// A bar augmented with the computed indicator fields.
///
/// Leading bars where an indicator's lookback window is unsatisfied carry
/// `None` rather than a numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub bar: Bar,
    pub ema_fast: Option<f64>,
    pub ema_slow: Option<f64>,
    pub rsi: Option<f64>,
    pub adx: Option<f64>,
}

impl IndicatorRow {
    /// Whether all four indicator fields are defined.
    pub fn is_complete(&self) -> bool {
        self.ema_fast.is_some()
            && self.ema_slow.is_some()
            && self.rsi.is_some()
            && self.adx.is_some()
    }
}

/// Compute one indicator row per bar. Pure function of the series.
///
/// Indicator outputs are tail-aligned vectors; each is mapped back onto
/// its bar index here, padding the head with `None`.
pub fn compute(series: &BarSeries) -> Vec<IndicatorRow> {
    let closes = series.closes();
    let highs = series.highs();
    let lows = series.lows();
    let len = series.len();

    let ema_fast = Ema::new(EMA_FAST_PERIOD).calculate(&closes);
    let ema_slow = Ema::new(EMA_SLOW_PERIOD).calculate(&closes);
    let rsi = Rsi::new(RSI_PERIOD).calculate(&closes);
    let adx: Vec<f64> = Adx::new(ADX_PERIOD)
        .calculate(&highs, &lows, &closes)
        .iter()
        .map(|out| out.adx)
        .collect();

    series
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            bar: *bar,
            ema_fast: aligned(&ema_fast, len, i),
            ema_slow: aligned(&ema_slow, len, i),
            rsi: aligned(&rsi, len, i),
            adx: aligned(&adx, len, i),
        })
        .collect()
}

/// Look up the value for bar index `i` in a tail-aligned output vector.
fn aligned(values: &[f64], input_len: usize, i: usize) -> Option<f64> {
    let offset = input_len - values.len();
    if i >= offset {
        Some(values[i - offset])
    } else {
        None
    }
}
