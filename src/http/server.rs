//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (request ID, tracing, metrics, security headers)
//!   with the client's own request ID captured before one is generated
//! - Bind server to listener and serve until shutdown

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    middleware,
    routing::{any, get, post},
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::{ServiceConfig, SnapshotProvider};
use crate::health::ProbeState;
use crate::http::handlers::{backend, configs, echo, info, job, probes, store};
use crate::http::request::{
    capture_client_request_id, propagate_request_id_layer, set_request_id_layer,
};
use crate::http::response::{not_acceptable, not_found};
use crate::observability::metrics;
use crate::security::headers::nosniff_layer;
use crate::store::ContentStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub probes: Arc<ProbeState>,
    pub store: ContentStore,
    pub client: Client<HttpConnector, Body>,
    pub configs: Option<Arc<dyn SnapshotProvider>>,
}

/// HTTP server for the diagnostic service.
pub struct HttpServer {
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        let store = ContentStore::new(&config.storage.data_path);

        let state = AppState {
            config: Arc::new(config),
            probes: Arc::new(ProbeState::new()),
            store,
            client,
            configs: None,
        };

        Self { state }
    }

    /// Attach the source behind `/configs`.
    pub fn with_snapshot_provider(mut self, provider: Arc<dyn SnapshotProvider>) -> Self {
        self.state.configs = Some(provider);
        self
    }

    /// Shared probe flags, for startup and shutdown control.
    pub fn probes(&self) -> Arc<ProbeState> {
        self.state.probes.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.state.config
    }

    /// Build the Axum router with all middleware layers.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(info::index))
            .route("/version", get(info::version))
            .route("/echo", post(echo::echo).fallback(not_acceptable))
            .route("/echo/headers", any(echo::echo_headers))
            .route("/backend", post(backend::backend).fallback(not_acceptable))
            .route("/job", post(job::job).fallback(not_acceptable))
            .route("/write", post(store::write).fallback(not_acceptable))
            .route("/read", post(store::read).fallback(not_acceptable))
            .route("/configs", get(configs::configs).fallback(not_acceptable))
            .route("/healthz", get(probes::healthz))
            .route("/readyz", get(probes::readyz))
            .route("/readyz/enable", post(probes::enable))
            .route("/readyz/disable", post(probes::disable))
            .route("/error", any(info::error))
            .route("/panic", any(info::panic))
            .route_layer(middleware::from_fn(metrics::track_metrics))
            .fallback(not_found)
            .with_state(self.state.clone())
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(capture_client_request_id))
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(nosniff_layer()),
            )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            data_path = %self.state.config.storage.data_path,
            backend = ?self.state.config.backend.url,
            "HTTP server starting"
        );

        let app = self
            .router()
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
