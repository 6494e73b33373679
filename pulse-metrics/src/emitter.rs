//! Best-effort metric emission

use crate::sink::{MetricDeliveryError, MetricsSink};
use crate::types::{Dimensions, MetricSample, MetricType};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of handing one sample to the sink.
///
/// Failure is a value, not an `Err`: metric delivery must never interrupt a
/// test run.
#[derive(Debug, Clone)]
pub enum Delivery {
    Delivered,
    Failed(MetricDeliveryError),
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered)
    }

    pub fn error(&self) -> Option<&MetricDeliveryError> {
        match self {
            Delivery::Delivered => None,
            Delivery::Failed(e) => Some(e),
        }
    }
}

/// Delivery counters for one emitter
#[derive(Debug, Default)]
pub struct DeliveryStats {
    delivered: AtomicU64,
    failed: AtomicU64,
}

impl DeliveryStats {
    fn record(&self, delivery: &Delivery) {
        match delivery {
            Delivery::Delivered => self.delivered.fetch_add(1, Ordering::Relaxed),
            Delivery::Failed(_) => self.failed.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> u64 {
        self.delivered() + self.failed()
    }
}

/// Tags samples with a namespace and stage and sends them to a sink
pub struct MetricsEmitter {
    sink: Arc<dyn MetricsSink>,
    namespace: String,
    stage: String,
    stats: DeliveryStats,
}

impl MetricsEmitter {
    pub fn new(
        sink: Arc<dyn MetricsSink>,
        namespace: impl Into<String>,
        stage: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            namespace: namespace.into(),
            stage: stage.into(),
            stats: DeliveryStats::default(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn stats(&self) -> &DeliveryStats {
        &self.stats
    }

    /// Emit one sample for `type_tag`. Failures are logged and counted.
    pub async fn emit(&self, metric: MetricType, value: f64, type_tag: &str) -> Delivery {
        let delivery = if value.is_finite() {
            let sample = MetricSample::new(
                metric,
                value,
                Dimensions::new(self.stage.as_str(), type_tag),
                self.namespace.as_str(),
            );

            match self.sink.put_metric(&sample).await {
                Ok(()) => {
                    debug!(
                        metric = metric.as_str(),
                        value,
                        type_tag,
                        "Metric delivered to {}",
                        self.sink.name()
                    );
                    Delivery::Delivered
                }
                Err(e) => Delivery::Failed(e),
            }
        } else {
            Delivery::Failed(MetricDeliveryError::InvalidSample(format!(
                "{} value {} is not finite",
                metric, value
            )))
        };

        if let Delivery::Failed(ref e) = delivery {
            warn!("Fail: put metric - {}", e);
        }

        self.stats.record(&delivery);
        delivery
    }
}
