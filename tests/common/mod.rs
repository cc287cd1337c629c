//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use package_builder::catalog::{ServiceCategory, ServiceOption};
use package_builder::config::AppConfig;
use package_builder::http::HttpServer;
use package_builder::lifecycle::Shutdown;

#[allow(dead_code)]
pub const ADMIN_KEY: &str = "test-admin-key";

pub fn service(id: &str, name: &str, category: ServiceCategory, price: f64) -> ServiceOption {
    ServiceOption {
        id: id.to_string(),
        name: name.to_string(),
        category,
        monthly_price: price,
        description: None,
        image_url: None,
        visible: true,
    }
}

/// A small but representative catalog: several categories, one hidden entry.
pub fn sample_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.observability.metrics_enabled = false;
    config.admin.enabled = true;
    config.admin.api_key = ADMIN_KEY.to_string();

    config.catalog.services = vec![
        service("brand-identity", "Brand Identity", ServiceCategory::Branding, 10.0),
        service("social-media", "Social Media Management", ServiceCategory::Media, 20.0),
        service("press-kit", "Press Kit", ServiceCategory::PublicRelations, 30.0),
        service("scout-report", "Scouting Report", ServiceCategory::Scouting, 40.0),
        service("contract-review", "Contract Review", ServiceCategory::ContractAdvisory, 50.0),
        service("sponsor-match", "Sponsor Matching", ServiceCategory::Partnerships, 60.0),
        ServiceOption {
            visible: false,
            ..service("legacy-plan", "Legacy Plan", ServiceCategory::Media, 5.0)
        },
    ];
    config
}

/// Boot the service on a loopback port; returns its address and the
/// shutdown handle that stops it.
#[allow(dead_code)]
pub async fn spawn_service(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let (_config_tx, config_updates) = mpsc::unbounded_channel();

    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    (addr, shutdown)
}
