//! Diagnostic HTTP service.
//!
//! A controllable endpoint for orchestration and chaos tooling: probes,
//! request echo, simulated work, a backend proxy with trace propagation and
//! a content-addressable blob store.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ handlers ─┬─▶ probes (health::ProbeState)
//!                     (request id,              ├─▶ echo / job
//!                      tracing,                 ├─▶ store (ContentStore on disk)
//!                      metrics)                 ├─▶ configs (ConfigDirWatcher snapshot)
//!                                               └─▶ backend ──────────────▶ Upstream
//! ```

use std::path::PathBuf;

use clap::Parser;

use diagnostic_service::config::load_config;
use diagnostic_service::lifecycle::startup;
use diagnostic_service::observability::logging;

#[derive(Parser)]
#[command(name = "diagnostic-service")]
#[command(version, about = "Diagnostic HTTP service for orchestration and chaos testing", long_about = None)]
struct Args {
    /// Optional TOML configuration file. Environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init_logging(&config.observability);

    tracing::info!(
        version = diagnostic_service::version::VERSION,
        commit = diagnostic_service::version::GIT_COMMIT,
        "diagnostic-service starting"
    );

    tracing::info!(
        bind_address = %config.listener.bind_address,
        data_path = %config.storage.data_path,
        backend = ?config.backend.url,
        configs = ?config.configs.path,
        "Configuration loaded"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
