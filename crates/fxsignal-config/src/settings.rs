//! Configuration structures.

use fxsignal_core::error::{SignalError, SignalResult};
use fxsignal_core::types::Instrument;
use fxsignal_engine::EvaluatorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main application configuration.
///
/// Loaded from an optional TOML file plus `FXSIGNAL__*` environment
/// overrides; every section defaults to the reference behaviour so the
/// service runs with no file at all. The provider credential is resolved
/// from the environment, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
    #[serde(default = "default_instruments")]
    pub instruments: Vec<InstrumentSetting>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// HTTP server binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Quote-provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub base_url: String,
    /// Name of the environment variable holding the API credential
    pub api_key_env: String,
    pub output_size: String,
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.alphavantage.co/query".to_string(),
            api_key_env: "API_KEY".to_string(),
            output_size: "compact".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Polling loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    pub interval_secs: u64,
    /// Series shorter than this skip evaluation
    pub min_bars: usize,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_secs: 60,
            min_bars: 30,
        }
    }
}

/// One configured currency pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentSetting {
    pub base: String,
    pub quote: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingSettings::default(),
            server: ServerSettings::default(),
            provider: ProviderSettings::default(),
            poll: PollSettings::default(),
            evaluator: EvaluatorConfig::default(),
            instruments: default_instruments(),
        }
    }
}

fn default_instruments() -> Vec<InstrumentSetting> {
    [("EUR", "USD"), ("GBP", "USD"), ("USD", "JPY"), ("AUD", "USD")]
        .iter()
        .map(|(base, quote)| InstrumentSetting {
            base: base.to_string(),
            quote: quote.to_string(),
        })
        .collect()
}

impl Settings {
    /// Load settings from an optional TOML file and the environment.
    ///
    /// Environment overrides use the `FXSIGNAL__` prefix with `__` as the
    /// section separator, e.g. `FXSIGNAL__SERVER__PORT=9000`.
    pub fn load(path: Option<&Path>) -> SignalResult<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                builder = builder.add_source(config::File::from(path));
            }
        }

        builder = builder
            .add_source(config::Environment::with_prefix("FXSIGNAL").separator("__"));

        let settings: Settings = builder
            .build()
            .map_err(|e| SignalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SignalError::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> SignalResult<()> {
        if self.instruments.is_empty() {
            return Err(SignalError::Config("at least one instrument required".into()));
        }
        if self.poll.interval_secs == 0 {
            return Err(SignalError::Config("poll interval must be positive".into()));
        }
        self.evaluator.validate()
    }

    /// The configured instruments, in evaluation order.
    pub fn instruments(&self) -> Vec<Instrument> {
        self.instruments
            .iter()
            .map(|i| Instrument::new(i.base.clone(), i.quote.clone()))
            .collect()
    }

    /// Resolve the provider credential from the environment.
    pub fn api_key(&self) -> SignalResult<String> {
        std::env::var(&self.provider.api_key_env)
            .map_err(|_| SignalError::Config(format!("{} not set", self.provider.api_key_env)))
    }

    /// Polling interval as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.interval_secs)
    }

    /// Provider request timeout as a duration.
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }
}
