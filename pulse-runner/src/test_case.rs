//! Test case records and the ordered set executed on every repetition

use crate::error::RunnerResult;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;

/// One request/expected-response pair plus the pause that follows it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(rename = "type")]
    pub case_type: String,

    #[serde(rename = "resource")]
    pub resource_path: String,

    #[serde(rename = "request")]
    pub request_body: JsonValue,

    /// Partial document the response must contain
    #[serde(rename = "response")]
    pub expected_response: JsonValue,

    #[serde(rename = "interval", default, deserialize_with = "crate::de::seconds")]
    pub interval_seconds: u64,
}

impl TestCase {
    /// `Type` metric dimension: `{test_name}/{type}`
    pub fn type_tag(&self, test_name: &str) -> String {
        format!("{}/{}", test_name, self.case_type)
    }

    /// Request path under the stage: `/{stage}/{resource}`
    pub fn request_path(&self, project_stage: &str) -> String {
        format!(
            "/{}/{}",
            project_stage,
            self.resource_path.trim_start_matches('/')
        )
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }
}

/// Ordered, immutable sequence of test cases. Cloning shares the cases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCaseSet {
    cases: Arc<[TestCase]>,
}

impl TestCaseSet {
    pub fn new(cases: Vec<TestCase>) -> Self {
        Self {
            cases: cases.into(),
        }
    }

    /// Decode a JSON array of test cases
    pub fn from_value(value: JsonValue) -> RunnerResult<Self> {
        let cases: Vec<TestCase> = serde_json::from_value(value)?;
        Ok(Self::new(cases))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn as_slice(&self) -> &[TestCase] {
        &self.cases
    }
}

impl From<Vec<TestCase>> for TestCaseSet {
    fn from(cases: Vec<TestCase>) -> Self {
        Self::new(cases)
    }
}

impl<'a> IntoIterator for &'a TestCaseSet {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_wire_names() {
        let case: TestCase = serde_json::from_value(json!({
            "type": "predict",
            "resource": "predict",
            "request": {"input": [0.1, 0.2]},
            "response": {"success": true},
            "interval": 2
        }))
        .unwrap();

        assert_eq!(case.case_type, "predict");
        assert_eq!(case.interval(), Duration::from_secs(2));
        assert_eq!(case.type_tag("ApiGateway"), "ApiGateway/predict");
        assert_eq!(case.request_path("dev"), "/dev/predict");
    }

    #[test]
    fn test_interval_defaults_and_accepts_strings() {
        let case: TestCase = serde_json::from_value(json!({
            "type": "t", "resource": "/r", "request": {}, "response": {}
        }))
        .unwrap();
        assert_eq!(case.interval_seconds, 0);
        assert_eq!(case.request_path("prod"), "/prod/r");

        let case: TestCase = serde_json::from_value(json!({
            "type": "t", "resource": "r", "request": {}, "response": {}, "interval": "3"
        }))
        .unwrap();
        assert_eq!(case.interval_seconds, 3);
    }

    #[test]
    fn test_negative_interval_rejected() {
        let result: Result<TestCase, _> = serde_json::from_value(json!({
            "type": "t", "resource": "r", "request": {}, "response": {}, "interval": -1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_set_preserves_order() {
        let set = TestCaseSet::from_value(json!([
            {"type": "b", "resource": "r", "request": {}, "response": {}},
            {"type": "a", "resource": "r", "request": {}, "response": {}},
            {"type": "c", "resource": "r", "request": {}, "response": {}}
        ]))
        .unwrap();

        let order: Vec<&str> = set.iter().map(|c| c.case_type.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        assert_eq!(set.len(), 3);

        let shared = set.clone();
        assert_eq!(shared.as_slice(), set.as_slice());
    }
}
