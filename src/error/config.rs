//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating [`ChatConfig`](crate::startup::ChatConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("endpoint '{0}' must start with http:// or https://")]
    InvalidEndpoint(String),

    #[error("temperature {0} is outside 0.0..=2.0")]
    InvalidTemperature(f32),

    #[error("{var} has invalid value '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::MissingApiKey => "E_CFG_KEY",
            ConfigError::InvalidEndpoint(_) => "E_CFG_ENDPOINT",
            ConfigError::InvalidTemperature(_) => "E_CFG_TEMP",
            ConfigError::InvalidEnv { .. } => "E_CFG_ENV",
            ConfigError::Read { .. } => "E_CFG_READ",
            ConfigError::Parse { .. } => "E_CFG_PARSE",
        }
    }
}
