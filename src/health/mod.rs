//! Health signalling subsystem.
//!
//! # Data Flow
//! ```text
//! Readiness (state.rs):
//!     POST /readyz/enable | /readyz/disable, startup, shutdown drain
//!     → ProbeState.ready
//!     → GET /readyz
//!
//! Liveness (state.rs, active.rs):
//!     Periodic self-check of the storage directory
//!     → ProbeState.live
//!     → GET /healthz
//! ```
//!
//! # Design Decisions
//! - Each flag is one atomic cell; no invariant spans both
//! - Readiness is never changed by the request path except the toggle endpoints

pub mod active;
pub mod state;

pub use active::SelfCheck;
pub use state::ProbeState;
