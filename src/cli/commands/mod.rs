//! Command implementations.

pub mod cycle;
pub mod serve;
pub mod validate;

use anyhow::Result;
use fxsignal_config::Settings;
use fxsignal_data::{AlphaVantageClient, AlphaVantageConfig};
use fxsignal_engine::{Evaluator, PublisherConfig, SignalPublisher};

/// Wire a publisher over the real provider from loaded settings.
fn build_publisher(settings: &Settings) -> Result<SignalPublisher<AlphaVantageClient>> {
    let api_key = settings.api_key()?;

    let client = AlphaVantageClient::new(AlphaVantageConfig {
        base_url: settings.provider.base_url.clone(),
        api_key,
        output_size: settings.provider.output_size.clone(),
        timeout: settings.provider_timeout(),
    })?;

    Ok(SignalPublisher::new(
        client,
        Evaluator::new(settings.evaluator.clone()),
        settings.instruments(),
        PublisherConfig {
            interval: settings.poll_interval(),
            min_bars: settings.poll.min_bars,
        },
    ))
}
