//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Bind → Start watchers and self-check → Mark ready (optional) → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Readiness dropped → Drain grace → Stop accepting → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: a listener that cannot bind is fatal
//! - A broken config directory watcher is not; `/configs` then reports nothing

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::StartupError;
