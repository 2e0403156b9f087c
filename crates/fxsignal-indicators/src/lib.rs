//! Technical indicators for the FX signal pipeline.
//!
//! This crate provides batch implementations of the indicators the signal
//! rule needs:
//! - Moving averages (EMA)
//! - Momentum (RSI, Wilder smoothing)
//! - Trend strength (ADX with DI+/DI-)
//!
//! All indicators follow the tail-alignment convention of
//! [`fxsignal_core::Indicator`]: the returned vector holds only defined
//! values, with `output[0]` corresponding to input index
//! `input.len() - output.len()`.

pub mod momentum;
pub mod moving_average;
pub mod trend;

pub use momentum::Rsi;
pub use moving_average::Ema;
pub use trend::{Adx, AdxOutput};
