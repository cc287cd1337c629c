//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, metrics)
//! - Hold shared state (config, catalog, sessions, carts) behind ArcSwap
//! - Apply config reloads without dropping live sessions
//! - Serve with graceful shutdown

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::builder::SessionStore;
use crate::cart::CartStore;
use crate::catalog::ServiceCatalog;
use crate::config::AppConfig;
use crate::http::handlers;
use crate::observability::metrics;

/// Snapshot of everything the handlers need.
///
/// Swapped wholesale on config reload; session and cart stores are carried
/// over so a reload never drops in-flight builder state.
pub struct InnerState {
    pub config: AppConfig,
    pub catalog: ServiceCatalog,
    pub sessions: SessionStore,
    pub cart: CartStore,
    pub request_count: Arc<AtomicUsize>,
    pub started_at: Instant,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<InnerState>>,
}

impl AppState {
    /// Build fresh state from a validated config.
    pub fn new(config: AppConfig) -> Self {
        let catalog = ServiceCatalog::build(
            config.catalog.services.clone(),
            &config.catalog.excluded_categories,
        );
        metrics::record_catalog_size(catalog.visible_services().len());

        let cart = match &config.cart.persistence_path {
            Some(path) => CartStore::load_from_file(path).unwrap_or_else(|e| {
                tracing::error!(path = %path, error = %e, "Failed to load cart persistence file");
                CartStore::new(Some(path.clone()))
            }),
            None => CartStore::new(None),
        };

        Self {
            inner: Arc::new(ArcSwap::from_pointee(InnerState {
                config,
                catalog,
                sessions: SessionStore::new(),
                cart,
                request_count: Arc::new(AtomicUsize::new(0)),
                started_at: Instant::now(),
            })),
        }
    }

    /// Swap in a reloaded config, rebuilding the catalog but keeping live
    /// sessions, carts, and counters.
    pub fn apply_config(&self, config: AppConfig) {
        let current = self.inner.load_full();
        let catalog = ServiceCatalog::build(
            config.catalog.services.clone(),
            &config.catalog.excluded_categories,
        );
        metrics::record_catalog_size(catalog.visible_services().len());

        self.inner.store(Arc::new(InnerState {
            config,
            catalog,
            sessions: current.sessions.clone(),
            cart: current.cart.clone(),
            request_count: current.request_count.clone(),
            started_at: current.started_at,
        }));
    }
}

/// HTTP server for the package builder.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let state = AppState::new(config.clone());
        let router = Self::build_router(&config, state.clone());
        Self { router, state }
    }

    /// Shared state, exposed for tests.
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/health", get(handlers::health))
            .route("/api/services", get(handlers::list_services))
            .route("/api/sessions", post(handlers::create_session))
            .route(
                "/api/sessions/{id}",
                get(handlers::get_session).delete(handlers::close_session),
            )
            .route("/api/sessions/{id}/toggle", post(handlers::toggle_service))
            .route(
                "/api/sessions/{id}/quantity",
                post(handlers::adjust_quantity),
            )
            .route("/api/sessions/{id}/reset", post(handlers::reset_session))
            .route("/api/sessions/{id}/checkout", post(handlers::checkout))
            .route("/api/cart/{id}", get(handlers::get_cart))
            .with_state(state.clone());

        if config.admin.enabled {
            router = router.merge(admin::admin_router(state.clone()));
        }

        // The metrics middleware sits above the body-limit layer: it must see
        // the request body as axum's `Body` (the limit layer rewraps it), and
        // this way limit rejections are still counted.
        router.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                )))
                .layer(axum::middleware::from_fn_with_state(state, track_metrics))
                .layer(RequestBodyLimitLayer::new(config.security.max_body_size)),
        )
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Config reloads arrive over `config_updates` and are applied without
    /// restarting; the shutdown receiver ends the accept loop gracefully.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let reload_state = self.state.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                reload_state.apply_config(config);
                tracing::info!("Configuration reloaded");
            }
        });

        // Reap abandoned builder sessions so the store stays bounded.
        let sweep_state = self.state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(60));
            loop {
                interval.tick().await;
                let inner = sweep_state.inner.load_full();
                let idle_secs = inner.config.timeouts.session_idle_secs;
                if idle_secs == 0 {
                    continue;
                }
                let removed = inner.sessions.prune_idle(Duration::from_secs(idle_secs));
                if removed > 0 {
                    metrics::record_sessions_open(inner.sessions.len());
                    tracing::info!(removed, "Reaped idle builder sessions");
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record request count and latency for every handled request.
pub async fn track_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    state
        .inner
        .load()
        .request_count
        .fetch_add(1, Ordering::Relaxed);
    metrics::record_request(&method, &path, response.status().as_u16(), start);

    response
}
