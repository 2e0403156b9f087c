//! The signal-generation pipeline.
//!
//! One polling cycle runs fetch → compute → evaluate for every configured
//! instrument and atomically replaces the published signal set:
//! - [`analyze`] augments a bar series with EMA/RSI/ADX rows
//! - [`evaluate`] reduces the last two rows to at most one direction
//! - [`publish`] drives the cycle on a fixed interval and owns the
//!   shared result set

pub mod analyze;
pub mod evaluate;
pub mod publish;

pub use analyze::{compute, IndicatorRow};
pub use evaluate::{Evaluator, EvaluatorConfig};
pub use publish::{PublisherConfig, SignalFeed, SignalPublisher};
