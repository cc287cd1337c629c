//! Package builder service for the agency's marketing site.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │              PACKAGE BUILDER SERVICE           │
//!                    │                                               │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ sessions │──▶│ selection  │  │
//!                    │  │ server  │   │  store   │   │  reducer   │  │
//!                    │  └─────────┘   └──────────┘   └─────┬──────┘  │
//!                    │       │                             │         │
//!                    │       ▼                             ▼         │
//!                    │  ┌─────────┐                  ┌────────────┐  │
//!   Client Response  │  │ catalog │                  │  pricing   │  │
//!   ◀────────────────┼──│ (swap)  │                  │ calculator │  │
//!                    │  └─────────┘                  └─────┬──────┘  │
//!                    │                                     │         │
//!                    │                               ┌─────▼──────┐  │
//!                    │          checkout ───────────▶│    cart    │  │
//!                    │                               └────────────┘  │
//!                    │                                               │
//!                    │  ┌─────────────────────────────────────────┐  │
//!                    │  │          Cross-Cutting Concerns          │  │
//!                    │  │  ┌────────┐ ┌───────────┐ ┌───────────┐  │  │
//!                    │  │  │ config │ │ observa-  │ │ lifecycle │  │  │
//!                    │  │  │ reload │ │ bility    │ │ shutdown  │  │  │
//!                    │  │  └────────┘ └───────────┘ └───────────┘  │  │
//!                    │  └─────────────────────────────────────────┘  │
//!                    └───────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use package_builder::config::{load_config, watch_config, AppConfig};
use package_builder::http::HttpServer;
use package_builder::lifecycle::Shutdown;
use package_builder::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config_path = Path::new(&config_path).to_path_buf();

    // Load configuration before logging init so the configured level applies.
    let config = if config_path.exists() {
        load_config(&config_path)?
    } else {
        AppConfig::default()
    };

    logging::init(&config.observability.log_level);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "package-builder starting");
    if !config_path.exists() {
        tracing::warn!(path = ?config_path, "Config file not found, using defaults (empty catalog)");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        services = config.catalog.services.len(),
        admin_enabled = config.admin.enabled,
        "Configuration loaded"
    );

    // Metrics exporter on its own listener.
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Hot reload: watch the config file when one exists.
    let (_watcher, config_updates) = if config_path.exists() {
        match watch_config(&config_path) {
            Ok((watcher, rx)) => (Some(watcher), rx),
            Err(e) => {
                tracing::error!(error = %e, "Failed to start config watcher, hot reload disabled");
                let (_tx, rx) = mpsc::unbounded_channel();
                (None, rx)
            }
        }
    } else {
        let (_tx, rx) = mpsc::unbounded_channel();
        (None, rx)
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config);
    server
        .run(listener, config_updates, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
