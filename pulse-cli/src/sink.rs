//! Metrics backend selection

use anyhow::Result;
use pulse_config::{MetricsBackend, MetricsConfig};
use pulse_metrics::{LogSink, MetricsSink, NullSink};
use std::sync::Arc;

pub async fn build_sink(config: &MetricsConfig) -> Result<Arc<dyn MetricsSink>> {
    match config.backend {
        MetricsBackend::Log => Ok(Arc::new(LogSink)),
        MetricsBackend::None => Ok(Arc::new(NullSink)),
        MetricsBackend::CloudWatch => cloudwatch_sink(config).await,
    }
}

#[cfg(feature = "cloudwatch")]
async fn cloudwatch_sink(config: &MetricsConfig) -> Result<Arc<dyn MetricsSink>> {
    let sink = pulse_metrics::CloudWatchSink::from_env(config.region.clone()).await;
    Ok(Arc::new(sink))
}

#[cfg(not(feature = "cloudwatch"))]
async fn cloudwatch_sink(_config: &MetricsConfig) -> Result<Arc<dyn MetricsSink>> {
    anyhow::bail!("metrics backend 'cloudwatch' requires building pulse with the `cloudwatch` feature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builds_local_backends() {
        let log = build_sink(&MetricsConfig::default()).await.unwrap();
        assert_eq!(log.name(), "log");

        let none = build_sink(&MetricsConfig {
            backend: MetricsBackend::None,
            region: None,
        })
        .await
        .unwrap();
        assert_eq!(none.name(), "none");
    }

    #[cfg(not(feature = "cloudwatch"))]
    #[tokio::test]
    async fn test_cloudwatch_needs_feature() {
        let result = build_sink(&MetricsConfig {
            backend: MetricsBackend::CloudWatch,
            region: Some("us-east-1".to_string()),
        })
        .await;
        assert!(result.is_err());
    }
}
