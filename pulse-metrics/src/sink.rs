//! Metrics sink trait

use crate::types::MetricSample;
use async_trait::async_trait;

/// Backend that accepts one sample per call
#[async_trait]
pub trait MetricsSink: Send + Sync {
    /// Deliver a single sample
    async fn put_metric(&self, sample: &MetricSample) -> Result<(), MetricDeliveryError>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// Failure to hand a sample to the backend
#[derive(Debug, Clone, thiserror::Error)]
pub enum MetricDeliveryError {
    #[error("{backend} rejected metric {metric}: {message}")]
    Rejected {
        backend: &'static str,
        metric: String,
        message: String,
    },

    #[error("{backend} unavailable: {message}")]
    Unavailable {
        backend: &'static str,
        message: String,
    },

    #[error("Invalid metric sample: {0}")]
    InvalidSample(String),
}
