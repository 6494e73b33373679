//! Metric sample types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Metrics emitted by a test run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricType {
    ResponseTime,
    StatusSuccess,
    StatusError,
    TestSuccess,
    TestFail,
}

impl MetricType {
    /// Metric name as sent to the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::ResponseTime => "ResponseTime",
            MetricType::StatusSuccess => "StatusSuccess",
            MetricType::StatusError => "StatusError",
            MetricType::TestSuccess => "TestSuccess",
            MetricType::TestFail => "TestFail",
        }
    }

    /// Latency is in milliseconds, everything else is a count
    pub fn unit(&self) -> MetricUnit {
        match self {
            MetricType::ResponseTime => MetricUnit::Milliseconds,
            _ => MetricUnit::Count,
        }
    }

    pub fn all() -> &'static [MetricType] {
        &[
            MetricType::ResponseTime,
            MetricType::StatusSuccess,
            MetricType::StatusError,
            MetricType::TestSuccess,
            MetricType::TestFail,
        ]
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricUnit {
    Milliseconds,
    Count,
}

impl MetricUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricUnit::Milliseconds => "Milliseconds",
            MetricUnit::Count => "Count",
        }
    }
}

impl fmt::Display for MetricUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Stage` and `Type` dimensions attached to every sample
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(rename = "Stage")]
    pub stage: String,
    #[serde(rename = "Type")]
    pub type_tag: String,
}

impl Dimensions {
    pub fn new(stage: impl Into<String>, type_tag: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            type_tag: type_tag.into(),
        }
    }

    /// Dimension name/value pairs in backend order
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [("Stage", self.stage.as_str()), ("Type", self.type_tag.as_str())]
    }
}

/// One numeric observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub name: MetricType,
    pub value: f64,
    pub unit: MetricUnit,
    pub dimensions: Dimensions,
    pub namespace: String,
}

impl MetricSample {
    /// Build a sample whose unit follows from the metric type
    pub fn new(
        name: MetricType,
        value: f64,
        dimensions: Dimensions,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            name,
            value,
            unit: name.unit(),
            dimensions,
            namespace: namespace.into(),
        }
    }
}
