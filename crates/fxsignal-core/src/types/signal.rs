//! Trading signal types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    /// Wire label used by the query interface.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "BUY",
            Direction::Sell => "SELL",
        }
    }
}

/// Expiry label attached to every signal. The service trades 1-minute
/// bars, so signals are only meaningful for the next minute.
pub const SIGNAL_EXPIRY: &str = "1 Minute";

/// A directional signal for one instrument, produced at most once per
/// polling cycle. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Pair identifier, e.g. "EURUSD"
    pub pair: String,
    /// BUY or SELL
    pub direction: Direction,
    /// Expiry label, fixed at "1 Minute"
    pub expiry: String,
    /// When the cycle that produced this signal published it
    pub generated_at: DateTime<Utc>,
}

impl Signal {
    /// Create a signal with the standard expiry label.
    pub fn new(pair: impl Into<String>, direction: Direction, generated_at: DateTime<Utc>) -> Self {
        Self {
            pair: pair.into(),
            direction,
            expiry: SIGNAL_EXPIRY.to_string(),
            generated_at,
        }
    }
}

/// The complete output of one polling cycle.
///
/// Owned by the publisher and replaced wholesale each cycle, never mutated
/// in place, so concurrent readers always observe a fully-formed set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalSet {
    /// Signals in configured-instrument order
    pub signals: Vec<Signal>,
    /// When this set was published; None for the initial empty set
    pub published_at: Option<DateTime<Utc>>,
}

impl SignalSet {
    /// Create a set from a finished cycle's signals.
    pub fn new(signals: Vec<Signal>, published_at: DateTime<Utc>) -> Self {
        Self {
            signals,
            published_at: Some(published_at),
        }
    }

    /// Number of signals in the set.
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Whether the set holds no signals.
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Look up the signal for a pair, if one was produced this cycle.
    pub fn get(&self, pair: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.pair == pair)
    }
}
