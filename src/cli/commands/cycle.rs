//! Single-cycle command implementation.
//!
//! Runs one fetch → compute → evaluate pass and prints the resulting
//! signals as JSON. Useful as an operational smoke test without binding
//! the HTTP server or waiting for the interval.

use anyhow::Result;
use std::path::Path;

use fxsignal_config::Settings;
use fxsignal_server::SignalDto;

use super::build_publisher;

pub async fn run(config_path: &Path) -> Result<()> {
    let settings = Settings::load(Some(config_path))?;
    let publisher = build_publisher(&settings)?;

    let set = publisher.run_cycle().await;
    let body: Vec<SignalDto> = set.signals.iter().map(SignalDto::from).collect();
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
