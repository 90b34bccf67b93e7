//! Configuration module for the copilot engine.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before use. Every section has defaults, so an empty document
//! is a valid configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use copilot_engine::config::load_config;
//!
//! let config = load_config(Some("config.yaml"))?;
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod observability;
mod server;
mod simulation;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig, OtelConfig};
pub use server::ServerConfig;
pub use simulation::SimulationConfig;

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Upper bound for any single artificial latency.
const MAX_LATENCY_MS: u64 = 60_000;

/// Upper bound for the suggestion time-to-live (one week).
pub const MAX_SUGGESTION_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Simulated latencies.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Load configuration from a YAML file with environment variable interpolation.
///
/// `path` defaults to `config.yaml`.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a file if it exists, otherwise fall back to defaults.
pub fn load_config_or_default(path: &str) -> Result<Config, ConfigError> {
    if Path::new(path).exists() {
        load_config(Some(path))
    } else {
        tracing::info!(path, "Config file not found, using defaults");
        let config = Config::default();
        validate_config(&config)?;
        Ok(config)
    }
}

/// Load configuration from a YAML string.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map(|m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    let sim = &config.simulation;
    for (name, value) in [
        ("account_latency_ms", sim.account_latency_ms),
        ("suggestion_latency_ms", sim.suggestion_latency_ms),
        ("approval_latency_ms", sim.approval_latency_ms),
        ("execution_latency_ms", sim.execution_latency_ms),
    ] {
        if value > MAX_LATENCY_MS {
            return Err(ConfigError::ValidationError(format!(
                "simulation.{name} must be at most {MAX_LATENCY_MS}"
            )));
        }
    }

    if sim.suggestion_ttl_secs == 0 || sim.suggestion_ttl_secs > MAX_SUGGESTION_TTL_SECS {
        return Err(ConfigError::ValidationError(format!(
            "simulation.suggestion_ttl_secs must be between 1 and {MAX_SUGGESTION_TTL_SECS}"
        )));
    }

    if config.observability.logging.level.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "observability.logging.level must not be empty".to_string(),
        ));
    }

    if config.observability.otel.enabled && config.observability.otel.endpoint.is_empty() {
        return Err(ConfigError::ValidationError(
            "observability.otel.endpoint is required when otel is enabled".to_string(),
        ));
    }

    Ok(())
}
