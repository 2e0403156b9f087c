//! Logging setup.

use fxsignal_config::LoggingSettings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Effective logging options: CLI flags win, the configured `[logging]`
/// section fills in whatever the flags leave unset.
pub fn resolve(
    cli_level: Option<&str>,
    cli_json: bool,
    settings: &LoggingSettings,
) -> (String, bool) {
    let level = cli_level.unwrap_or(&settings.level).to_string();
    let json = cli_json || settings.format == "json";
    (level, json)
}

/// Setup logging with the given level.
pub fn setup_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }
}
