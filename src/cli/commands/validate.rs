//! Validate configuration command.

use anyhow::Result;
use std::path::Path;

use fxsignal_config::Settings;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match Settings::load(Some(config_path)) {
        Ok(settings) => {
            println!("Configuration is valid!");
            println!();
            println!("Log level: {}", settings.logging.level);
            println!("Bind: {}:{}", settings.server.bind, settings.server.port);
            println!("Provider: {}", settings.provider.base_url);
            println!("API key env: {}", settings.provider.api_key_env);
            println!("Poll interval: {}s", settings.poll.interval_secs);
            println!("Minimum bars: {}", settings.poll.min_bars);
            let pairs: Vec<String> = settings.instruments().iter().map(|i| i.pair()).collect();
            println!("Instruments: {}", pairs.join(", "));

            match settings.api_key() {
                Ok(_) => println!("API credential: present"),
                Err(_) => println!(
                    "API credential: {} is not set (required for serve)",
                    settings.provider.api_key_env
                ),
            }
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
