//! Core types and traits for the FX signal service.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Instrument, Bar, BarSeries)
//! - Signal types (Direction, Signal, SignalSet)
//! - Core traits for indicators and quote fetchers

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ProviderError, SignalError, SignalResult};
pub use traits::*;
pub use types::*;
