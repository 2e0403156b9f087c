//! Alpha Vantage FX_INTRADAY integration.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use fxsignal_core::error::ProviderError;
use fxsignal_core::traits::QuoteFetcher;
use fxsignal_core::types::{Bar, BarSeries, Instrument};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const SERIES_KEY: &str = "Time Series FX (1min)";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Alpha Vantage client configuration.
#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    pub base_url: String,
    pub api_key: String,
    /// "compact" (~100 most recent bars) or "full"
    pub output_size: String,
    /// Per-request timeout so one stalled call cannot hold up a cycle
    pub timeout: Duration,
}

impl AlphaVantageConfig {
    /// Create a config with the provider defaults.
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: "https://www.alphavantage.co/query".to_string(),
            api_key,
            output_size: "compact".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Load the credential from the environment.
    pub fn from_env(api_key_var: &str) -> Result<Self, ProviderError> {
        let api_key = std::env::var(api_key_var)
            .map_err(|_| ProviderError::Request(format!("{api_key_var} not set")))?;
        Ok(Self::new(api_key))
    }
}

/// Quote fetcher backed by the Alpha Vantage FX_INTRADAY endpoint.
pub struct AlphaVantageClient {
    http: Client,
    config: AlphaVantageConfig,
}

/// Intraday response envelope. Alpha Vantage reports throttling via a
/// "Note" field and bad requests via "Error Message", both with a 200
/// status, so the series key itself is optional.
#[derive(Debug, Deserialize)]
struct IntradayResponse {
    #[serde(rename = "Time Series FX (1min)")]
    series: Option<HashMap<String, RawBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
}

/// One provider bar; all prices are string-encoded numbers.
#[derive(Debug, Deserialize)]
struct RawBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
}

impl AlphaVantageClient {
    /// Create a new client with a bounded request timeout.
    pub fn new(config: AlphaVantageConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl QuoteFetcher for AlphaVantageClient {
    async fn fetch(&self, instrument: &Instrument) -> Result<BarSeries, ProviderError> {
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("function", "FX_INTRADAY"),
                ("from_symbol", instrument.base.as_str()),
                ("to_symbol", instrument.quote.as_str()),
                ("interval", "1min"),
                ("apikey", self.config.api_key.as_str()),
                ("outputsize", self.config.output_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let series = parse_intraday(&instrument.pair(), &body)?;
        debug!(pair = %series.pair, bars = series.len(), "fetched intraday window");
        Ok(series)
    }

    fn name(&self) -> &str {
        "alphavantage"
    }
}

/// Parse an FX_INTRADAY body into a chronologically ordered series.
///
/// The provider keys bars by timestamp string in arbitrary order;
/// `BarSeries::from_unordered` establishes the ascending invariant.
fn parse_intraday(pair: &str, body: &str) -> Result<BarSeries, ProviderError> {
    let response: IntradayResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    let series = match response.series {
        Some(series) => series,
        None => {
            if let Some(msg) = response.error_message {
                return Err(ProviderError::MissingSeries(msg));
            }
            if let Some(note) = response.note {
                return Err(ProviderError::MissingSeries(note));
            }
            return Err(ProviderError::MissingSeries(SERIES_KEY.to_string()));
        }
    };

    let mut bars = Vec::with_capacity(series.len());
    for (timestamp, raw) in series {
        bars.push(parse_bar(&timestamp, &raw)?);
    }

    Ok(BarSeries::from_unordered(pair, bars))
}

fn parse_bar(timestamp: &str, raw: &RawBar) -> Result<Bar, ProviderError> {
    let ts = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map_err(|e| ProviderError::Parse(format!("bad timestamp {timestamp:?}: {e}")))?
        .and_utc()
        .timestamp_millis();

    Ok(Bar::new(
        ts,
        parse_price("open", &raw.open)?,
        parse_price("high", &raw.high)?,
        parse_price("low", &raw.low)?,
        parse_price("close", &raw.close)?,
    ))
}

fn parse_price(field: &str, value: &str) -> Result<f64, ProviderError> {
    value
        .parse::<f64>()
        .map_err(|_| ProviderError::Parse(format!("bad {field} price {value:?}")))
}
