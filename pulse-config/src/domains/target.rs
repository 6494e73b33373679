//! Target API configuration
//!
//! Identifies the API under test and the project/stage the emitted metrics
//! are attributed to. The project name doubles as the metric namespace and the
//! stage is both a metric dimension and the first segment of every request
//! path.

use crate::error::ConfigResult;
use crate::validation::{validate_endpoint, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Prefix of the metric `Type` dimension (`{test_name}/{case type}`)
    #[serde(default = "default_test_name")]
    pub test_name: String,

    /// Metric namespace
    pub project_name: String,

    /// Deployment stage, e.g. `dev` or `prod`
    pub project_stage: String,

    /// API host (`abc.execute-api.region.amazonaws.com`) or base URL
    pub endpoint: String,

    /// Sent as `x-api-key` when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Sent as `Authentication` when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            test_name: default_test_name(),
            project_name: String::new(),
            project_stage: String::new(),
            endpoint: String::new(),
            api_key: None,
            auth_token: None,
        }
    }
}

impl Validatable for TargetConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.test_name, "test_name", self.domain_name())?;
        validate_required_string(&self.project_name, "project_name", self.domain_name())?;
        validate_required_string(&self.project_stage, "project_stage", self.domain_name())?;
        validate_endpoint(&self.endpoint, "endpoint", self.domain_name())?;

        if self.project_stage.contains('/') {
            return Err(self.validation_error("project_stage cannot contain '/'"));
        }

        if matches!(self.api_key.as_deref(), Some("")) {
            return Err(self.validation_error("api_key cannot be empty when set"));
        }

        if matches!(self.auth_token.as_deref(), Some("")) {
            return Err(self.validation_error("auth_token cannot be empty when set"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "target"
    }
}

fn default_test_name() -> String {
    "ApiGateway".to_string()
}
