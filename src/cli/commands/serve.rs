//! Serve command implementation.

use anyhow::Result;
use std::net::SocketAddr;
use std::path::Path;
use tokio::sync::watch;
use tracing::info;

use crate::cli::ServeArgs;
use fxsignal_config::Settings;

use super::build_publisher;

pub async fn run(args: ServeArgs, config_path: &Path) -> Result<()> {
    let mut settings = Settings::load(Some(config_path))?;
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    let addr: SocketAddr = format!("{}:{}", settings.server.bind, settings.server.port).parse()?;

    let publisher = build_publisher(&settings)?;
    let feed = publisher.feed();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let publisher_task = tokio::spawn(async move { publisher.run(shutdown_rx).await });

    fxsignal_server::serve(addr, feed, shutdown_signal()).await?;

    // The HTTP side is down; stop the polling loop too.
    shutdown_tx.send(true).ok();
    publisher_task.await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    info!("shutdown signal received, stopping");
}
