//! Content-addressable storage subsystem.
//!
//! # Data Flow
//! ```text
//! POST /write body
//!     → content.rs put (SHA-256 → key, write file named by key)
//!     → key returned to caller
//!
//! POST /read key
//!     → content.rs get (read file named by key)
//!     → stored bytes returned to caller
//! ```
//!
//! # Design Decisions
//! - Keys are always derived from content, never chosen by the caller
//! - No eviction; the directory grows without bound

pub mod content;

pub use content::{digest, ContentStore, StoreError};
