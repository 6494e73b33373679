//! Test loop configuration

use crate::error::{RunnerError, RunnerResult};
use pulse_config::TargetConfig;
use pulse_http::ApiCredentials;
use std::time::Duration;

/// Immutable settings for one loop invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    test_name: String,
    project_name: String,
    project_stage: String,
    endpoint: String,
    credentials: ApiCredentials,
    interval_seconds: u64,
    duration_seconds: u64,
}

impl TestConfig {
    pub fn builder() -> TestConfigBuilder {
        TestConfigBuilder::default()
    }

    /// Combine the target identity with the cadence delivered by a trigger
    pub fn from_target(
        target: &TargetConfig,
        interval_seconds: u64,
        duration_seconds: u64,
    ) -> RunnerResult<Self> {
        let mut builder = Self::builder()
            .test_name(target.test_name.as_str())
            .project_name(target.project_name.as_str())
            .project_stage(target.project_stage.as_str())
            .endpoint(target.endpoint.as_str())
            .interval_seconds(interval_seconds)
            .duration_seconds(duration_seconds);
        if let Some(ref key) = target.api_key {
            builder = builder.api_key(key.as_str());
        }
        if let Some(ref token) = target.auth_token {
            builder = builder.auth_token(token.as_str());
        }
        builder.build()
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// Metric namespace
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn project_stage(&self) -> &str {
        &self.project_stage
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn credentials(&self) -> &ApiCredentials {
        &self.credentials
    }

    pub fn interval_seconds(&self) -> u64 {
        self.interval_seconds
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    /// Pause between repetitions
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Total run time after which no new repetition starts
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_seconds)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestConfigBuilder {
    test_name: Option<String>,
    project_name: Option<String>,
    project_stage: Option<String>,
    endpoint: Option<String>,
    api_key: Option<String>,
    auth_token: Option<String>,
    interval_seconds: u64,
    duration_seconds: u64,
}

impl TestConfigBuilder {
    pub fn test_name(mut self, value: impl Into<String>) -> Self {
        self.test_name = Some(value.into());
        self
    }

    pub fn project_name(mut self, value: impl Into<String>) -> Self {
        self.project_name = Some(value.into());
        self
    }

    pub fn project_stage(mut self, value: impl Into<String>) -> Self {
        self.project_stage = Some(value.into());
        self
    }

    pub fn endpoint(mut self, value: impl Into<String>) -> Self {
        self.endpoint = Some(value.into());
        self
    }

    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        self.api_key = Some(value.into());
        self
    }

    pub fn auth_token(mut self, value: impl Into<String>) -> Self {
        self.auth_token = Some(value.into());
        self
    }

    pub fn interval_seconds(mut self, value: u64) -> Self {
        self.interval_seconds = value;
        self
    }

    pub fn duration_seconds(mut self, value: u64) -> Self {
        self.duration_seconds = value;
        self
    }

    pub fn build(self) -> RunnerResult<TestConfig> {
        let project_stage = required(self.project_stage, "project_stage")?;
        if project_stage.contains('/') {
            return Err(RunnerError::InvalidConfig {
                field: "project_stage",
                reason: "cannot contain '/'".to_string(),
            });
        }

        let endpoint = required(self.endpoint, "endpoint")?;
        pulse_http::build_url(&endpoint, "/").map_err(|e| RunnerError::InvalidConfig {
            field: "endpoint",
            reason: e.to_string(),
        })?;

        Ok(TestConfig {
            test_name: required(self.test_name, "test_name")?,
            project_name: required(self.project_name, "project_name")?,
            project_stage,
            endpoint,
            credentials: ApiCredentials::new(
                optional(self.api_key, "api_key")?,
                optional(self.auth_token, "auth_token")?,
            ),
            interval_seconds: self.interval_seconds,
            duration_seconds: self.duration_seconds,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> RunnerResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(RunnerError::InvalidConfig {
            field,
            reason: "cannot be empty".to_string(),
        }),
        None => Err(RunnerError::InvalidConfig {
            field,
            reason: "is required".to_string(),
        }),
    }
}

fn optional(value: Option<String>, field: &'static str) -> RunnerResult<Option<String>> {
    match value {
        Some(v) if v.is_empty() => Err(RunnerError::InvalidConfig {
            field,
            reason: "cannot be empty when set".to_string(),
        }),
        other => Ok(other),
    }
}
