//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, bounded body read)
//!     → handlers/ (echo, job, backend proxy, store, probes, configs, info)
//!     → response.rs (YAML bodies, error → status mapping)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use response::HandlerError;
pub use server::{AppState, HttpServer};
