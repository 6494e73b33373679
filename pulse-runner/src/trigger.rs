//! Trigger message decoding
//!
//! A run is started by a JSON message carrying the loop cadence and the test
//! data:
//!
//! ```json
//! {
//!   "Config": {"IntervalInSec": 5, "DurationInSec": "60"},
//!   "TestData": [
//!     {"type": "predict", "resource": "predict",
//!      "request": {"x": 1}, "response": {"success": true}, "interval": 1}
//!   ]
//! }
//! ```

use crate::config::TestConfig;
use crate::error::RunnerResult;
use crate::test_case::{TestCase, TestCaseSet};
use pulse_config::TargetConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Loop cadence from the `Config` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopSettings {
    #[serde(rename = "IntervalInSec", deserialize_with = "crate::de::seconds")]
    pub interval_seconds: u64,

    #[serde(rename = "DurationInSec", deserialize_with = "crate::de::seconds")]
    pub duration_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerMessage {
    #[serde(rename = "Config")]
    pub config: LoopSettings,

    #[serde(rename = "TestData", default)]
    pub test_data: Vec<TestCase>,
}

impl TriggerMessage {
    pub fn from_json(message: &str) -> RunnerResult<Self> {
        Ok(serde_json::from_str(message)?)
    }

    pub fn from_value(message: JsonValue) -> RunnerResult<Self> {
        Ok(serde_json::from_value(message)?)
    }

    /// Combine with the target identity into a validated config and the case set
    pub fn into_parts(self, target: &TargetConfig) -> RunnerResult<(TestConfig, TestCaseSet)> {
        let config = TestConfig::from_target(
            target,
            self.config.interval_seconds,
            self.config.duration_seconds,
        )?;
        Ok((config, TestCaseSet::new(self.test_data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunnerError;
    use serde_json::json;

    fn target() -> TargetConfig {
        TargetConfig {
            project_name: "DemoProject".to_string(),
            project_stage: "dev".to_string(),
            endpoint: "api.example.com".to_string(),
            ..TargetConfig::default()
        }
    }

    #[test]
    fn test_decode_message() {
        let message = TriggerMessage::from_json(
            r#"{
                "Config": {"IntervalInSec": 5, "DurationInSec": "60"},
                "TestData": [
                    {"type": "predict", "resource": "predict",
                     "request": {"x": 1}, "response": {"success": true}, "interval": 1},
                    {"type": "health", "resource": "/health",
                     "request": {}, "response": {}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            message.config,
            LoopSettings {
                interval_seconds: 5,
                duration_seconds: 60
            }
        );

        let (config, cases) = message.into_parts(&target()).unwrap();
        assert_eq!(config.interval_seconds(), 5);
        assert_eq!(config.project_stage(), "dev");
        assert_eq!(cases.len(), 2);
        assert_eq!(cases.as_slice()[1].case_type, "health");
    }

    #[test]
    fn test_whole_float_cadence_accepted() {
        let message = TriggerMessage::from_value(json!({
            "Config": {"IntervalInSec": 5.0, "DurationInSec": 60},
            "TestData": []
        }))
        .unwrap();
        assert_eq!(message.config.interval_seconds, 5);
    }

    #[test]
    fn test_missing_test_data_is_an_empty_set() {
        let message = TriggerMessage::from_value(json!({
            "Config": {"IntervalInSec": 0, "DurationInSec": 0}
        }))
        .unwrap();
        assert!(message.test_data.is_empty());
    }

    #[test]
    fn test_bad_cadence_rejected() {
        for config in [
            json!({"IntervalInSec": -1, "DurationInSec": 10}),
            json!({"IntervalInSec": "soon", "DurationInSec": 10}),
            json!({"IntervalInSec": 1}),
            json!({"IntervalInSec": 1.5, "DurationInSec": 10}),
        ] {
            let result = TriggerMessage::from_value(json!({"Config": config, "TestData": []}));
            assert!(matches!(result, Err(RunnerError::InvalidMessage(_))));
        }
    }

    #[test]
    fn test_incomplete_target_rejected() {
        let message = TriggerMessage::from_value(json!({
            "Config": {"IntervalInSec": 1, "DurationInSec": 1},
            "TestData": []
        }))
        .unwrap();

        let err = message.into_parts(&TargetConfig::default()).unwrap_err();
        assert!(matches!(err, RunnerError::InvalidConfig { .. }));
    }
}
