//! Client configuration.
//!
//! The endpoint, credential, model, and temperature are injected into the
//! completion client through [`ChatConfig`]; none of them are compiled in
//! except non-secret defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default completion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://open.bigmodel.cn/api/paas/v4/chat/completions";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "glm-4.5-flash";
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.6;
/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const ENV_ENDPOINT: &str = "CHATDECK_ENDPOINT";
pub const ENV_API_KEY: &str = "CHATDECK_API_KEY";
pub const ENV_MODEL: &str = "CHATDECK_MODEL";
pub const ENV_TEMPERATURE: &str = "CHATDECK_TEMPERATURE";
pub const ENV_LOG: &str = "CHATDECK_LOG";

/// Configuration for the completion client.
///
/// Use [`ChatConfig::load`] at startup, or the builder methods in tests.
///
/// # Example
///
/// ```
/// use chatdeck::startup::ChatConfig;
///
/// let config = ChatConfig::default()
///     .with_api_key("sk-test")
///     .with_model("glm-4-air");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, PartialEq)]
pub struct ChatConfig {
    /// Completion endpoint URL
    pub endpoint: String,
    /// Bearer token; empty means "not configured"
    pub api_key: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// tracing `EnvFilter` directive
    pub log_filter: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}

/// On-disk config file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub log_filter: Option<String>,
}

impl ConfigFile {
    /// Read and parse a JSON config file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `$CONFIG_DIR/chatdeck/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatdeck").join("config.json"))
}

impl ChatConfig {
    /// Create a ChatConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Load defaults, then the config file, then the environment, and validate.
    ///
    /// With `explicit_path` the file must exist. Without it the default
    /// location is used when present and skipped otherwise.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match explicit_path {
            Some(path) => config.apply_file(ConfigFile::read(path)?),
            None => {
                if let Some(path) = default_config_path().filter(|p| p.exists()) {
                    tracing::debug!("Loading config from {}", path.display());
                    config.apply_file(ConfigFile::read(&path)?);
                }
            }
        }

        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay the fields present in `file`.
    pub fn apply_file(&mut self, file: ConfigFile) {
        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(api_key) = file.api_key {
            self.api_key = api_key;
        }
        if let Some(model) = file.model {
            self.model = model;
        }
        if let Some(temperature) = file.temperature {
            self.temperature = temperature;
        }
        if let Some(log_filter) = file.log_filter {
            self.log_filter = log_filter;
        }
    }

    /// Overlay variables found by `lookup`; empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = get(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(api_key) = get(ENV_API_KEY) {
            self.api_key = api_key;
        }
        if let Some(model) = get(ENV_MODEL) {
            self.model = model;
        }
        if let Some(raw) = get(ENV_TEMPERATURE) {
            self.temperature = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_TEMPERATURE,
                value: raw.clone(),
            })?;
        }
        if let Some(log_filter) = get(ENV_LOG) {
            self.log_filter = log_filter;
        }
        Ok(())
    }

    /// Check that the configuration can be used for a request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ChatConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, DEFAULT_TEMPERATURE);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_default_without_key_fails_validation() {
        assert!(matches!(
            ChatConfig::default().validate(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn test_builder() {
        let config = ChatConfig::new()
            .with_endpoint("http://localhost:8080/v1/chat/completions")
            .with_api_key("k")
            .with_model("m")
            .with_temperature(1.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "m");
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let config = ChatConfig::new().with_api_key("k").with_endpoint("ftp://x");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_temperature() {
        for t in [-0.1, 2.5, f32::NAN] {
            let config = ChatConfig::new().with_api_key("k").with_temperature(t);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidTemperature(_))
            ));
        }
    }

    #[test]
    fn test_apply_file_overrides_present_fields_only() {
        let mut config = ChatConfig::default();
        config.apply_file(ConfigFile {
            api_key: Some("from-file".to_string()),
            model: Some("file-model".to_string()),
            ..Default::default()
        });
        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.model, "file-model");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_config_file_uses_camel_case() {
        let file: ConfigFile =
            serde_json::from_str(r#"{"apiKey":"k","temperature":0.2,"logFilter":"debug"}"#)
                .unwrap();
        assert_eq!(file.api_key.as_deref(), Some("k"));
        assert_eq!(file.temperature, Some(0.2));
        assert_eq!(file.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_apply_env() {
        let mut config = ChatConfig::default();
        config
            .apply_env(env(&[
                (ENV_API_KEY, "env-key"),
                (ENV_TEMPERATURE, "0.9"),
                (ENV_MODEL, ""),
            ]))
            .unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.temperature, 0.9);
        // Empty values do not clobber
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_apply_env_rejects_unparseable_temperature() {
        let mut config = ChatConfig::default();
        let result = config.apply_env(env(&[(ENV_TEMPERATURE, "warm")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ChatConfig::default().with_api_key("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
