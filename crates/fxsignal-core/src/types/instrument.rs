//! Currency-pair identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency pair, e.g. base = "EUR", quote = "USD".
///
/// The instrument set is fixed at startup; instruments are never created
/// or mutated while the service is running.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    /// Base currency code (the "from" symbol).
    pub base: String,
    /// Quote currency code (the "to" symbol).
    pub quote: String,
}

impl Instrument {
    /// Create a new instrument from currency codes.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Concatenated pair identifier, e.g. "EURUSD".
    pub fn pair(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}
