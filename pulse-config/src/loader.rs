//! Configuration loading and environment variable handling

use crate::domains::PulseConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with the default `PULSE` prefix
    pub fn new() -> Self {
        Self {
            prefix: "PULSE".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<PulseConfig> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let mut config: PulseConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<PulseConfig> {
        let mut config = PulseConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<PulseConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    fn apply_env_overrides(&self, config: &mut PulseConfig) -> ConfigResult<()> {
        self.apply_target_overrides(&mut config.target);
        self.apply_http_overrides(&mut config.http)?;
        self.apply_metrics_overrides(&mut config.metrics)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    fn apply_target_overrides(&self, config: &mut crate::domains::target::TargetConfig) {
        if let Ok(test_name) = self.get_env_var("TEST_NAME") {
            config.test_name = test_name;
        }

        if let Ok(project_name) = self.get_env_var("PROJECT_NAME") {
            config.project_name = project_name;
        }

        if let Ok(project_stage) = self.get_env_var("PROJECT_STAGE") {
            config.project_stage = project_stage;
        }

        if let Ok(endpoint) = self.get_env_var("API_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Ok(api_key) = self.get_env_var("API_KEY") {
            config.api_key = Some(api_key);
        }

        if let Ok(auth_token) = self.get_env_var("AUTH_TOKEN") {
            config.auth_token = Some(auth_token);
        }
    }

    fn apply_http_overrides(
        &self,
        config: &mut crate::domains::http::HttpConfig,
    ) -> ConfigResult<()> {
        let connect_timeout = self.get_seconds("HTTP_CONNECT_TIMEOUT")?;
        if let Some(timeout) = self.get_seconds("HTTP_TIMEOUT")? {
            config.timeout = timeout;
            // A shorter request budget also bounds the default connect phase.
            if connect_timeout.is_none() && config.connect_timeout > timeout {
                config.connect_timeout = timeout;
            }
        }
        if let Some(connect_timeout) = connect_timeout {
            config.connect_timeout = connect_timeout;
        }

        if let Ok(user_agent) = self.get_env_var("HTTP_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Ok(verify_ssl) = self.get_env_var("HTTP_VERIFY_SSL") {
            config.verify_ssl = verify_ssl
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_VERIFY_SSL: {}", e)))?;
        }

        Ok(())
    }

    fn apply_metrics_overrides(
        &self,
        config: &mut crate::domains::metrics::MetricsConfig,
    ) -> ConfigResult<()> {
        if let Ok(backend) = self.get_env_var("METRICS_BACKEND") {
            config.backend = crate::domains::metrics::MetricsBackend::from_str(&backend)
                .map_err(|_| {
                    ConfigError::EnvError(format!("Invalid METRICS_BACKEND: {}", backend))
                })?;
        }

        if let Ok(region) = self.get_env_var("METRICS_REGION") {
            config.region = Some(region);
        }

        Ok(())
    }

    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Whole seconds from an environment variable, if set
    fn get_seconds(&self, name: &str) -> ConfigResult<Option<std::time::Duration>> {
        match self.get_env_var(name) {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map(|seconds| Some(std::time::Duration::from_secs(seconds)))
                .map_err(|e| ConfigError::EnvError(format!("Invalid {}: {}", name, e))),
            Err(_) => Ok(None),
        }
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        let var = format!("{}_{}", self.prefix, name);
        let value = std::env::var(&var)?;
        debug!("Applying {} override", var);
        Ok(value)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
