//! Catalog Router (v1)
//!
//! Serves the catalog browser's route table over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                CATALOG ROUTER                │
//!                     │                                              │
//!  GET /api/resolve   │  ┌─────────┐    ┌──────────┐    ┌─────────┐ │
//!  ───────────────────┼─▶│  http   │───▶│ location │───▶│  table  │ │
//!                     │  │ server  │    │  parse   │    │ + match │ │
//!                     │  └─────────┘    └──────────┘    └────┬────┘ │
//!                     │       ▲                              │      │
//!  JSON resolution    │       └──────────────────────────────┘      │
//!  ◀──────────────────┼──                                           │
//!                     │  ┌────────────────────────────────────────┐ │
//!                     │  │ config (toml + watcher) · observability │ │
//!                     │  │ lifecycle (signals, graceful shutdown)  │ │
//!                     │  └────────────────────────────────────────┘ │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use catalog_router::config::{load_config, ConfigWatcher, RouterConfig};
use catalog_router::http::HttpServer;
use catalog_router::lifecycle::{signals, Shutdown};
use catalog_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "catalog-router")]
#[command(about = "Route resolution server for the catalog browser", long_about = None)]
struct Args {
    /// Route table configuration (TOML). Defaults to the built-in catalog.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("catalog-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        base = %config.history.base,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Keep the watcher handle alive for the lifetime of the server.
    let (_watcher, config_updates) = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path, &config);
            (Some(watcher.run()?), updates)
        }
        None => (None, mpsc::unbounded_channel().1),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_shutdown = shutdown.subscribe();

    let run = server.run(listener, config_updates, server_shutdown);
    tokio::pin!(run);

    tokio::select! {
        result = &mut run => result?,
        _ = signals::wait_for_signal() => {
            shutdown.trigger();
            run.await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
