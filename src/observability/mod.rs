//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Inbound request headers:
//!     → trace_context.rs (B3 trace identifiers)
//!     → outbound backend request
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//!     → Distributed tracing backends, through the propagated headers
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON optional) for machine parsing
//! - Request ID flows through all handlers and onto upstream calls
//! - Metrics are cheap and no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
pub mod trace_context;
