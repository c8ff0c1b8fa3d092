//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the diagnostic service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream used by the `/backend` proxy handler.
    pub backend: BackendConfig,

    /// Content-addressable store settings.
    pub storage: StorageConfig,

    /// Browser UI assets.
    pub ui: UiConfig,

    /// Watched configuration directory exposed on `/configs`.
    pub configs: ConfigsConfig,

    /// Probe settings.
    pub health: HealthConfig,

    /// Startup and shutdown behavior.
    pub lifecycle: LifecycleConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request hardening.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:9898").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9898".to_string(),
        }
    }
}

/// Backend proxy configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BackendConfig {
    /// Upstream URL requests are forwarded to. `None` disables the proxy.
    pub url: Option<String>,
}

/// Content store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Flat directory holding one file per digest.
    pub data_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: "/data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    /// Directory containing `vue.html`.
    pub path: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            path: "ui".to_string(),
        }
    }
}

/// Watched configuration directory.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConfigsConfig {
    /// Directory to watch. `None` means no watcher is attached.
    pub path: Option<String>,
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HealthConfig {
    /// Flip readiness to Ready once the listener is bound.
    pub ready_on_start: bool,

    /// Periodic liveness self-check.
    pub self_check: SelfCheckConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelfCheckConfig {
    /// Enable the liveness self-check loop.
    pub enabled: bool,

    /// Check interval in seconds.
    pub interval_secs: u64,
}

impl Default for SelfCheckConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: 10,
        }
    }
}

/// Lifecycle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Seconds between dropping readiness and closing the listener.
    pub drain_secs: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self { drain_secs: 3 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9797".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes. Unset means unbounded.
    pub max_body_size: Option<usize>,
}

impl SecurityConfig {
    /// Limit handed to body buffering.
    pub fn body_limit(&self) -> usize {
        self.max_body_size.unwrap_or(usize::MAX)
    }
}

