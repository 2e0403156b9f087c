//! Crossover + threshold decision rule.

use crate::analyze::IndicatorRow;
use fxsignal_core::error::SignalError;
use fxsignal_core::types::Direction;
use serde::{Deserialize, Serialize};

/// Thresholds for the decision rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// RSI band that confirms a bullish crossover (inclusive)
    pub buy_rsi_min: f64,
    pub buy_rsi_max: f64,
    /// RSI band that confirms a bearish crossover (inclusive)
    pub sell_rsi_min: f64,
    pub sell_rsi_max: f64,
    /// Minimum trend strength; the crossover only counts when ADX exceeds it
    pub adx_min: f64,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            buy_rsi_min: 50.0,
            buy_rsi_max: 70.0,
            sell_rsi_min: 30.0,
            sell_rsi_max: 50.0,
            adx_min: 20.0,
        }
    }
}

impl EvaluatorConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), SignalError> {
        if self.buy_rsi_min > self.buy_rsi_max {
            return Err(SignalError::Config("buy RSI band is inverted".into()));
        }
        if self.sell_rsi_min > self.sell_rsi_max {
            return Err(SignalError::Config("sell RSI band is inverted".into()));
        }
        if self.adx_min < 0.0 {
            return Err(SignalError::Config("adx_min must be non-negative".into()));
        }
        Ok(())
    }
}

/// Applies the crossover+threshold rule to the most recent two rows.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Create an evaluator with the given thresholds.
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Decide BUY, SELL, or no signal from the last two rows.
    ///
    /// Requires at least two trailing rows with all four indicator fields
    /// defined; anything less is insufficient data, not an error.
    ///
    /// BUY: the fast EMA crossed above the slow EMA between `prev` and
    /// `last`, RSI sits in the buy band and ADX shows a trend. SELL is the
    /// mirror image. The two crossover conditions are negations of each
    /// other, so at most one branch can hold.
    pub fn evaluate(&self, rows: &[IndicatorRow]) -> Option<Direction> {
        if rows.len() < 2 {
            return None;
        }
        let last = complete_values(&rows[rows.len() - 1])?;
        let prev = complete_values(&rows[rows.len() - 2])?;

        let cfg = &self.config;

        if prev.ema_fast < prev.ema_slow
            && last.ema_fast > last.ema_slow
            && last.rsi >= cfg.buy_rsi_min
            && last.rsi <= cfg.buy_rsi_max
            && last.adx > cfg.adx_min
        {
            return Some(Direction::Buy);
        }

        if prev.ema_fast > prev.ema_slow
            && last.ema_fast < last.ema_slow
            && last.rsi >= cfg.sell_rsi_min
            && last.rsi <= cfg.sell_rsi_max
            && last.adx > cfg.adx_min
        {
            return Some(Direction::Sell);
        }

        None
    }
}

struct RowValues {
    ema_fast: f64,
    ema_slow: f64,
    rsi: f64,
    adx: f64,
}

fn complete_values(row: &IndicatorRow) -> Option<RowValues> {
    Some(RowValues {
        ema_fast: row.ema_fast?,
        ema_slow: row.ema_slow?,
        rsi: row.rsi?,
        adx: row.adx?,
    })
}
