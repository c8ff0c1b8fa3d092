//! Shutdown coordination.

use std::time::Duration;

use tokio::sync::broadcast;

use crate::health::ProbeState;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that the server and background loops
/// subscribe to.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Drop readiness, give load balancers `grace` to notice, then trigger.
    pub async fn drain(&self, probes: &ProbeState, grace: Duration) {
        probes.set_ready(false);
        tracing::info!(grace_secs = grace.as_secs(), "Draining before shutdown");
        tokio::time::sleep(grace).await;
        self.trigger();
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
