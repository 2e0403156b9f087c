//! OHLC (Open, High, Low, Close) data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Compact OHLC bar at 1-minute granularity.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    /// Calculate the bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }

    /// Calculate the true range given the previous close.
    pub fn true_range(&self, prev_close: Option<f64>) -> f64 {
        match prev_close {
            Some(pc) => {
                let hl = self.high - self.low;
                let hc = (self.high - pc).abs();
                let lc = (self.low - pc).abs();
                hl.max(hc).max(lc)
            }
            None => self.high - self.low,
        }
    }
}

/// Time-series container for one instrument's bars.
///
/// Invariant: bars are strictly increasing by timestamp with no duplicates.
/// `push` enforces it by rejecting out-of-order bars; fetchers sort their
/// input before construction since provider ordering is not guaranteed.
#[derive(Debug, Clone)]
pub struct BarSeries {
    /// Pair identifier, e.g. "EURUSD"
    pub pair: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Create a new empty bar series.
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            bars: Vec::new(),
        }
    }

    /// Build a series from bars in arbitrary order.
    ///
    /// Sorts ascending by timestamp and drops duplicate timestamps,
    /// keeping the first occurrence.
    pub fn from_unordered(pair: impl Into<String>, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        bars.dedup_by_key(|b| b.timestamp);
        Self {
            pair: pair.into(),
            bars,
        }
    }

    /// Push a bar, rejecting any that would break chronological order.
    pub fn push(&mut self, bar: Bar) -> bool {
        match self.bars.last() {
            Some(last) if bar.timestamp <= last.timestamp => false,
            _ => {
                self.bars.push(bar);
                true
            }
        }
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}
