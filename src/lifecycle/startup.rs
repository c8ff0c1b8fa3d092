//! Startup orchestration.
//!
//! # Order
//! 1. Metrics exporter (if enabled)
//! 2. Listener bind (fail fast)
//! 3. Config directory watcher (optional, non-fatal)
//! 4. Liveness self-check loop
//! 5. Readiness, signal handling, serve

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::{ConfigDirWatcher, ServiceConfig};
use crate::health::SelfCheck;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Start every subsystem and serve until a shutdown signal arrives.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let mut server = HttpServer::new(config.clone());

    // Dropping the handle stops notifications, so it lives until serve returns.
    let _watch_handle = match &config.configs.path {
        Some(path) => {
            let watcher = ConfigDirWatcher::new(Path::new(path));
            match watcher.run() {
                Ok(handle) => {
                    server = server.with_snapshot_provider(Arc::new(watcher));
                    Some(handle)
                }
                Err(e) => {
                    tracing::error!(path = %path, error = %e, "Config watcher failed to start");
                    None
                }
            }
        }
        None => None,
    };

    let shutdown = Arc::new(Shutdown::new());
    let probes = server.probes();

    let self_check = SelfCheck::new(
        probes.clone(),
        config.storage.data_path.clone().into(),
        config.health.self_check.clone(),
    );
    tokio::spawn(self_check.run(shutdown.subscribe()));

    if config.health.ready_on_start {
        probes.set_ready(true);
    }

    let server_shutdown = shutdown.subscribe();
    let drain = Duration::from_secs(config.lifecycle.drain_secs);
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.drain(&probes, drain).await;
    });

    server.run(listener, server_shutdown).await?;
    Ok(())
}
