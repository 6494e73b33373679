//! Amazon CloudWatch sink

use crate::sink::{MetricDeliveryError, MetricsSink};
use crate::types::{MetricSample, MetricUnit};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum, StandardUnit};
use aws_sdk_cloudwatch::Client;
use tracing::info;

/// One `PutMetricData` call per sample
#[derive(Debug, Clone)]
pub struct CloudWatchSink {
    client: Client,
}

impl CloudWatchSink {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the SDK default credential chain, optionally
    /// pinned to `region`
    pub async fn from_env(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            info!("Using CloudWatch region {}", region);
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self::new(Client::new(&config))
    }

    fn datum(sample: &MetricSample) -> MetricDatum {
        let builder = MetricDatum::builder()
            .metric_name(sample.name.as_str())
            .unit(match sample.unit {
                MetricUnit::Milliseconds => StandardUnit::Milliseconds,
                MetricUnit::Count => StandardUnit::Count,
            })
            .value(sample.value);

        sample
            .dimensions
            .pairs()
            .into_iter()
            .fold(builder, |builder, (name, value)| {
                builder.dimensions(Dimension::builder().name(name).value(value).build())
            })
            .build()
    }
}

#[async_trait]
impl MetricsSink for CloudWatchSink {
    async fn put_metric(&self, sample: &MetricSample) -> Result<(), MetricDeliveryError> {
        let datum = Self::datum(sample);

        self.client
            .put_metric_data()
            .namespace(sample.namespace.as_str())
            .metric_data(datum)
            .send()
            .await
            .map_err(|e| MetricDeliveryError::Rejected {
                backend: self.name(),
                metric: sample.name.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "cloudwatch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimensions, MetricType};

    fn sample(metric: MetricType, value: f64) -> MetricSample {
        MetricSample::new(metric, value, Dimensions::new("prod", "ApiGateway/predict"), "DemoProject")
    }

    #[test]
    fn test_datum_units_follow_metric_type() {
        let latency = CloudWatchSink::datum(&sample(MetricType::ResponseTime, 12.5));
        assert_eq!(latency.metric_name(), Some("ResponseTime"));
        assert_eq!(latency.unit(), Some(&StandardUnit::Milliseconds));
        assert_eq!(latency.value(), Some(12.5));

        let count = CloudWatchSink::datum(&sample(MetricType::TestFail, 1.0));
        assert_eq!(count.unit(), Some(&StandardUnit::Count));
    }

    #[test]
    fn test_datum_dimensions_are_stage_then_type() {
        let datum = CloudWatchSink::datum(&sample(MetricType::StatusSuccess, 1.0));
        let dimensions: Vec<(Option<&str>, Option<&str>)> = datum
            .dimensions()
            .iter()
            .map(|d| (d.name(), d.value()))
            .collect();

        assert_eq!(
            dimensions,
            vec![
                (Some("Stage"), Some("prod")),
                (Some("Type"), Some("ApiGateway/predict")),
            ]
        );
    }
}
