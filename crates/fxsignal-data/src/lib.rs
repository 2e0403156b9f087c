//! Quote-provider integrations.

mod alpha_vantage;

pub use alpha_vantage::{AlphaVantageClient, AlphaVantageConfig};
