//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → shared via AppState to all handlers
//!
//! Watched config directory (configs.path):
//!     watcher.rs detects file changes
//!     → rebuilds name → content map
//!     → atomic swap of the published snapshot
//!     → /configs reads the current snapshot
//! ```
//!
//! # Design Decisions
//! - Service config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - The watched directory is exposed through a capability that may be absent

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{LogFormat, ServiceConfig};
pub use watcher::{ConfigDirWatcher, SnapshotProvider};
