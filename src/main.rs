//! FX signal service CLI application.

mod cli;
mod logging;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, LogLevel};
use fxsignal_config::Settings;
use logging::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging. The configured [logging] section supplies defaults;
    // an unloadable config falls back to the built-in ones so
    // validate-config can still run and report the real error.
    let logging_defaults = Settings::load(Some(&cli.config))
        .map(|s| s.logging)
        .unwrap_or_default();
    let (level, json) = logging::resolve(
        cli.log_level.as_ref().map(LogLevel::as_str),
        cli.json_logs,
        &logging_defaults,
    );
    setup_logging(&level, json);

    // Execute command
    match cli.command {
        Commands::Serve(args) => cli::commands::serve::run(args, &cli.config).await,
        Commands::Cycle => cli::commands::cycle::run(&cli.config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
