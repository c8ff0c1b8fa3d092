//! Configuration validation.
//!
//! Semantic checks run after serde has accepted the syntax. Every problem is
//! reported, not just the first one.

use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("backend.url {url:?} is invalid: {reason}")]
    BackendUrl { url: String, reason: String },

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),

    #[error("security.max_body_size must be greater than zero")]
    MaxBodySize,

    #[error("health.self_check.interval_secs must be greater than zero")]
    SelfCheckInterval,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Some(raw) = &config.backend.url {
        match url::Url::parse(raw) {
            Ok(parsed) if parsed.scheme() == "http" => {}
            Ok(parsed) => errors.push(ValidationError::BackendUrl {
                url: raw.clone(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            }),
            Err(e) => errors.push(ValidationError::BackendUrl {
                url: raw.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.security.max_body_size == Some(0) {
        errors.push(ValidationError::MaxBodySize);
    }

    if config.health.self_check.enabled && config.health.self_check.interval_secs == 0 {
        errors.push(ValidationError::SelfCheckInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
