//! Security hardening.
//!
//! # Scope
//! - Response headers (headers.rs)
//! - Body size limits are enforced where bodies are read
//!   ([`read_body`](crate::http::request::read_body))
//!
//! No authentication.

pub mod headers;
