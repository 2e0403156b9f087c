//! Core traits for the FX signal service.

mod fetcher;
mod indicator;

pub use fetcher::QuoteFetcher;
pub use indicator::{Indicator, MultiOutputIndicator};
