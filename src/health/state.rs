//! Process-wide readiness and liveness flags.
//!
//! # States
//! - Readiness: NotReady (initial) ↔ Ready, toggled by explicit enable/disable
//! - Liveness: Healthy (initial) ↔ Unhealthy, toggled by the self-check loop
//!
//! The two flags are independent; each is a single atomic cell.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::observability::metrics;

/// Shared probe state read by `/readyz` and `/healthz`.
#[derive(Debug)]
pub struct ProbeState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl ProbeState {
    /// NotReady and Healthy.
    pub fn new() -> Self {
        metrics::record_probe_state("readiness", false);
        metrics::record_probe_state("liveness", true);
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        let previous = self.ready.swap(ready, Ordering::SeqCst);
        if previous != ready {
            tracing::info!(ready, "Readiness changed");
        }
        metrics::record_probe_state("readiness", ready);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    pub fn set_live(&self, live: bool) {
        let previous = self.live.swap(live, Ordering::SeqCst);
        if previous != live {
            tracing::warn!(live, "Liveness changed");
        }
        metrics::record_probe_state("liveness", live);
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

impl Default for ProbeState {
    fn default() -> Self {
        Self::new()
    }
}
