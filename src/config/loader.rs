//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServiceConfig::default(),
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment-provided values onto `config`.
///
/// Each setting accepts the historical lower/camel-case variable name as well
/// as an upper-case one. Empty values are ignored.
pub fn apply_env_overrides<F>(mut config: ServiceConfig, lookup: F) -> ServiceConfig
where
    F: Fn(&str) -> Option<String>,
{
    let get = |names: &[&str]| {
        names
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.is_empty())
    };

    if let Some(url) = get(&["backend_url", "BACKEND_URL"]) {
        config.backend.url = Some(url);
    }
    if let Some(path) = get(&["data_path", "DATA_PATH"]) {
        config.storage.data_path = path;
    }
    if let Some(path) = get(&["uiPath", "UI_PATH"]) {
        config.ui.path = path;
    }
    if let Some(path) = get(&["configPath", "CONFIG_PATH"]) {
        config.configs.path = Some(path);
    }
    if let Some(port) = get(&["PORT"]) {
        config.listener.bind_address = format!("0.0.0.0:{}", port);
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_file_values() {
        let config = apply_env_overrides(
            ServiceConfig::default(),
            env(&[
                ("backend_url", "http://upstream:9898/echo"),
                ("DATA_PATH", "/tmp/blobs"),
                ("uiPath", "/srv/ui"),
                ("PORT", "8080"),
            ]),
        );

        assert_eq!(config.backend.url.as_deref(), Some("http://upstream:9898/echo"));
        assert_eq!(config.storage.data_path, "/tmp/blobs");
        assert_eq!(config.ui.path, "/srv/ui");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.configs.path.is_none());
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let config = apply_env_overrides(ServiceConfig::default(), env(&[("backend_url", "")]));
        assert!(config.backend.url.is_none());
    }

    #[test]
    fn parses_partial_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[storage]\ndata_path = \"/var/lib/diag\"\n\n[health]\nready_on_start = true\n"
        )
        .unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let config: ServiceConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.storage.data_path, "/var/lib/diag");
        assert!(config.health.ready_on_start);
        assert_eq!(config.listener.bind_address, "0.0.0.0:9898");
    }
}
