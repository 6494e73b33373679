//! Log-backed sinks

use crate::sink::{MetricDeliveryError, MetricsSink};
use crate::types::MetricSample;
use async_trait::async_trait;
use tracing::info;

/// Writes every sample as a structured `tracing` event on the
/// `pulse::metrics` target
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetricsSink for LogSink {
    async fn put_metric(&self, sample: &MetricSample) -> Result<(), MetricDeliveryError> {
        info!(
            target: "pulse::metrics",
            namespace = %sample.namespace,
            metric = sample.name.as_str(),
            value = sample.value,
            unit = sample.unit.as_str(),
            stage = %sample.dimensions.stage,
            type_tag = %sample.dimensions.type_tag,
            "metric"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Accepts and drops every sample
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

#[async_trait]
impl MetricsSink for NullSink {
    async fn put_metric(&self, _sample: &MetricSample) -> Result<(), MetricDeliveryError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimensions, MetricType};

    #[tokio::test]
    async fn test_log_and_null_sinks_accept_samples() {
        let sample = MetricSample::new(
            MetricType::TestSuccess,
            1.0,
            Dimensions::new("dev", "ApiGateway/predict"),
            "DemoProject",
        );
        assert!(LogSink::new().put_metric(&sample).await.is_ok());
        assert!(NullSink.put_metric(&sample).await.is_ok());
        assert_eq!(LogSink.name(), "log");
        assert_eq!(NullSink.name(), "none");
    }
}
