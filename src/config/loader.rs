//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "RELAY_CONFIG";

/// Environment variable overriding the listener port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable overriding the upstream timeout.
pub const UPSTREAM_TIMEOUT_ENV: &str = "UPSTREAM_TIMEOUT_SECS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {var}")]
    Env { var: &'static str, value: String },

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

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RelayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the runtime configuration: optional file, then environment
/// overrides, then validation.
pub fn resolve_config() -> Result<RelayConfig, ConfigError> {
    let mut config = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => {
            tracing::info!(path = %path, "Loading configuration file");
            load_config(Path::new(&path))?
        }
        Err(_) => RelayConfig::default(),
    };

    config.apply_env_overrides()?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

impl RelayConfig {
    /// Apply `PORT` and `UPSTREAM_TIMEOUT_SECS` from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|var| std::env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(PORT_ENV) {
            self.listener.port = value.trim().parse().map_err(|_| ConfigError::Env {
                var: PORT_ENV,
                value,
            })?;
        }

        if let Some(value) = lookup(UPSTREAM_TIMEOUT_ENV) {
            self.upstream.timeout_secs = value.trim().parse().map_err(|_| ConfigError::Env {
                var: UPSTREAM_TIMEOUT_ENV,
                value,
            })?;
        }

        Ok(())
    }
}
