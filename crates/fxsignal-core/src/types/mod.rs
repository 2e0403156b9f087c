//! Core data types for the FX signal service.

mod instrument;
mod ohlc;
mod signal;

pub use instrument::Instrument;
pub use ohlc::{Bar, BarSeries};
pub use signal::{Direction, Signal, SignalSet};
