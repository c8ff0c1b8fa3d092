//! Liveness self-check.
//!
//! # Responsibilities
//! - Periodically verify the content store directory is usable
//! - Update the liveness flag based on results

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::config::schema::SelfCheckConfig;
use crate::health::state::ProbeState;

pub struct SelfCheck {
    probes: Arc<ProbeState>,
    data_path: PathBuf,
    config: SelfCheckConfig,
}

impl SelfCheck {
    pub fn new(probes: Arc<ProbeState>, data_path: PathBuf, config: SelfCheckConfig) -> Self {
        Self {
            probes,
            data_path,
            config,
        }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        if !self.config.enabled {
            tracing::info!("Liveness self-check disabled");
            return;
        }

        tracing::info!(
            interval = self.config.interval_secs,
            path = ?self.data_path,
            "Liveness self-check starting"
        );

        let mut ticker = time::interval(Duration::from_secs(self.config.interval_secs));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.check_once().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Self-check received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Run one check and record the outcome. Returns the new liveness.
    pub async fn check_once(&self) -> bool {
        let healthy = match tokio::fs::metadata(&self.data_path).await {
            Ok(meta) if meta.is_dir() => true,
            Ok(_) => {
                tracing::warn!(path = ?self.data_path, "Self-check failed: not a directory");
                false
            }
            Err(e) => {
                tracing::warn!(path = ?self.data_path, error = %e, "Self-check failed: storage unavailable");
                false
            }
        };

        self.probes.set_live(healthy);
        healthy
    }
}
