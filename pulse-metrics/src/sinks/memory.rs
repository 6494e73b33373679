//! In-memory sink

use crate::sink::{MetricDeliveryError, MetricsSink};
use crate::types::{MetricSample, MetricType};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// Keeps every delivered sample. While failing, rejects every delivery
/// without recording it.
#[derive(Debug, Default)]
pub struct InMemorySink {
    samples: Mutex<Vec<MetricSample>>,
    failing: AtomicBool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that is unavailable from the start
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.set_failing(true);
        sink
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of the recorded samples in delivery order
    pub fn samples(&self) -> Vec<MetricSample> {
        self.samples.lock().clone()
    }

    /// Number of samples recorded for `metric`
    pub fn count(&self, metric: MetricType) -> usize {
        self.samples.lock().iter().filter(|s| s.name == metric).count()
    }

    /// Number of samples recorded for `metric` with the given `Type` dimension
    pub fn count_for(&self, metric: MetricType, type_tag: &str) -> usize {
        self.samples
            .lock()
            .iter()
            .filter(|s| s.name == metric && s.dimensions.type_tag == type_tag)
            .count()
    }

    /// Metric names in delivery order
    pub fn names(&self) -> Vec<MetricType> {
        self.samples.lock().iter().map(|s| s.name).collect()
    }

    pub fn clear(&self) {
        self.samples.lock().clear();
    }
}

#[async_trait]
impl MetricsSink for InMemorySink {
    async fn put_metric(&self, sample: &MetricSample) -> Result<(), MetricDeliveryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MetricDeliveryError::Unavailable {
                backend: self.name(),
                message: "sink is failing".to_string(),
            });
        }
        self.samples.lock().push(sample.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
