//! Application configuration.
//!
//! Aggregates configuration into a single Config struct that can be loaded
//! from YAML files or environment variables.

use std::collections::HashMap;

use serde::Deserialize;

use crate::health::{HealthStatus, DEFAULT_PROBE_STREAM};

#[cfg(test)]
mod tests;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "ES_CONTEXT_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "ES_CONTEXT";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "ES_CONTEXT_LOG";

/// Default EventStoreDB connection string.
pub const DEFAULT_CONNECTION_STRING: &str = "esdb://localhost:2113?tls=false";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// How contexts are handed out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMode {
    /// One context built from `eventstore.connection_string`, shared by all
    /// identifiers.
    Fixed,
    /// One context per identifier, built from the tenant's connection string.
    #[default]
    MultiTenant,
}

/// Event store configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventStoreConfig {
    /// Context mode discriminator.
    pub mode: ContextMode,
    /// Connection string used in fixed mode and by the health probe.
    pub connection_string: String,
}

impl Default for EventStoreConfig {
    fn default() -> Self {
        Self {
            mode: ContextMode::MultiTenant,
            connection_string: DEFAULT_CONNECTION_STRING.to_string(),
        }
    }
}

/// Health probe configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// System stream read by the probe.
    pub stream: String,
    /// Probe username. Ignored unless `password` is also set.
    pub username: Option<String>,
    /// Probe password.
    pub password: Option<String>,
    /// Status reported when the probe fails.
    pub failure_status: HealthStatus,
    /// Resolve link events while reading.
    pub resolve_link_tos: bool,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            stream: DEFAULT_PROBE_STREAM.to_string(),
            username: None,
            password: None,
            failure_status: HealthStatus::Unhealthy,
            resolve_link_tos: true,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Event store configuration.
    pub eventstore: EventStoreConfig,
    /// Tenant identifier -> event store connection string.
    pub tenants: HashMap<String, String>,
    /// Health probe configuration.
    pub health: HealthConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `config.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix, e.g.
    ///    `ES_CONTEXT__EVENTSTORE__MODE=fixed`
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse configuration from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
