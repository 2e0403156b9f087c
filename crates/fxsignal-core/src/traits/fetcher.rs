//! Quote fetcher trait definition.

use crate::error::ProviderError;
use crate::types::{BarSeries, Instrument};
use async_trait::async_trait;

/// Trait for intraday quote providers.
///
/// Implementations retrieve a recent window of 1-minute bars for one
/// instrument and return them sorted ascending by timestamp. Any failure
/// (network, status, malformed body) is a recoverable per-instrument
/// condition; callers skip the instrument for the current cycle and retry
/// on the next one.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    /// Fetch the most recent intraday window for the given instrument.
    async fn fetch(&self, instrument: &Instrument) -> Result<BarSeries, ProviderError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}
