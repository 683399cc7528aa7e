//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the resolution handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Swap in rebuilt route tables on config reload
//!
//! # Design Decisions
//! - Handlers read a snapshot of the table; a reload never blocks them
//! - A config that fails to build a table is logged and dropped
//! - Only routes, history and not-found settings are reloadable

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::body::Body;
use axum::http::Request;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::RouterConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::observability::metrics;
use crate::routing::{RouteTable, RouteTableError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<ArcSwap<RouteTable>>,
}

/// HTTP server exposing route resolution.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
    table: Arc<ArcSwap<RouteTable>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RouterConfig) -> Result<Self, RouteTableError> {
        let table = RouteTable::from_config(&config)?;
        metrics::set_route_count(table.len());

        let table = Arc::new(ArcSwap::from_pointee(table));
        let state = AppState {
            table: table.clone(),
        };
        let router = build_router(&config, state);

        Ok(Self {
            router,
            config,
            table,
        })
    }

    /// The Axum router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The currently live route table.
    pub fn table(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    /// Get a reference to the startup config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, applying config updates
    /// as they arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<RouterConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, routes = self.table.load().len(), "HTTP server starting");

        tokio::spawn(apply_updates(self.table.clone(), config_updates));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &RouterConfig, state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health))
        .route("/api/routes", get(handlers::list_routes))
        .route("/api/resolve", get(handlers::resolve))
        .route("/api/href/{name}", get(handlers::href))
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                request_id = %request_id(req),
            )
        }))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
}

/// Rebuild the table from `config` and swap it in.
///
/// The live table is untouched on failure.
pub fn apply_config(
    table: &ArcSwap<RouteTable>,
    config: &RouterConfig,
) -> Result<(), RouteTableError> {
    let rebuilt = RouteTable::from_config(config)?;
    metrics::set_route_count(rebuilt.len());
    table.store(Arc::new(rebuilt));
    Ok(())
}

async fn apply_updates(
    table: Arc<ArcSwap<RouteTable>>,
    mut updates: mpsc::UnboundedReceiver<RouterConfig>,
) {
    while let Some(config) = updates.recv().await {
        match apply_config(&table, &config) {
            Ok(()) => tracing::info!(routes = config.routes.len(), "Route table reloaded"),
            Err(e) => tracing::error!(error = %e, "Rejected route config, keeping current table"),
        }
    }
}
