//! Metrics backend configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetricsConfig {
    /// Where samples are delivered
    #[serde(default)]
    pub backend: MetricsBackend,

    /// AWS region for the CloudWatch backend; the SDK default chain is used
    /// when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetricsBackend {
    /// Structured log events only
    #[default]
    Log,
    /// Amazon CloudWatch `PutMetricData`
    #[serde(alias = "cloud_watch")]
    CloudWatch,
    /// Discard all samples
    None,
}

impl MetricsBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricsBackend::Log => "log",
            MetricsBackend::CloudWatch => "cloudwatch",
            MetricsBackend::None => "none",
        }
    }
}

impl fmt::Display for MetricsBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricsBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "log" => Ok(MetricsBackend::Log),
            "cloudwatch" | "cloud_watch" => Ok(MetricsBackend::CloudWatch),
            "none" => Ok(MetricsBackend::None),
            _ => Err(format!("Invalid metrics backend: {}", s)),
        }
    }
}

impl Validatable for MetricsConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(ref region) = self.region {
            validate_required_string(region, "region", self.domain_name())?;
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "metrics"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_backend_from_str() {
        assert_eq!(MetricsBackend::from_str("CloudWatch").unwrap(), MetricsBackend::CloudWatch);
        assert_eq!(MetricsBackend::from_str("log").unwrap(), MetricsBackend::Log);
        assert!(MetricsBackend::from_str("statsd").is_err());
    }

    #[test]
    fn test_metrics_config_yaml() {
        let config: MetricsConfig =
            serde_yaml::from_str("backend: cloudwatch\nregion: eu-west-1\n").unwrap();
        assert_eq!(config.backend, MetricsBackend::CloudWatch);
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_region_rejected() {
        let config = MetricsConfig {
            backend: MetricsBackend::CloudWatch,
            region: Some(String::new()),
        };
        assert!(config.validate().is_err());
    }
}
