//! Outbound HTTP client settings

use crate::domains::utils::{default_true, serde_duration};
use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const IDLE_CONNECTIONS_PER_HOST: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request budget covering connect, send and reading the body.
    /// Expiry surfaces as a transport failure for that request.
    #[serde(with = "serde_duration")]
    pub timeout: Duration,

    #[serde(with = "serde_duration")]
    pub connect_timeout: Duration,

    pub user_agent: String,

    #[serde(default = "default_true")]
    pub verify_ssl: bool,

    /// Connections kept open between test cases
    pub max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            user_agent: concat!("pulse/", env!("CARGO_PKG_VERSION")).to_string(),
            verify_ssl: true,
            max_idle_per_host: IDLE_CONNECTIONS_PER_HOST,
        }
    }
}

impl Validatable for HttpConfig {
    fn validate(&self) -> ConfigResult<()> {
        let domain = self.domain_name();
        validate_positive(self.timeout.as_secs(), "timeout", domain)?;
        validate_positive(self.connect_timeout.as_secs(), "connect_timeout", domain)?;
        validate_required_string(&self.user_agent, "user_agent", domain)?;

        if self.connect_timeout > self.timeout {
            return Err(self.validation_error(format!(
                "connect_timeout of {:?} is longer than the {:?} request timeout",
                self.connect_timeout, self.timeout
            )));
        }
        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "http"
    }
}
