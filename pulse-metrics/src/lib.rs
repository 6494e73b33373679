//! # Pulse metrics
//!
//! Named, dimensioned numeric samples delivered to a monitoring backend one
//! call per sample. Delivery is best effort: [`MetricsEmitter`] never retries,
//! never buffers, and reports failures as a [`Delivery::Failed`] value instead
//! of an error so callers cannot accidentally abort on them.
//!
//! ## Sinks
//!
//! - [`LogSink`]: structured `tracing` events
//! - [`InMemorySink`]: keeps samples for inspection, can simulate outages
//! - [`NullSink`]: discards everything
//! - `CloudWatchSink` (feature `cloudwatch`): Amazon CloudWatch `PutMetricData`

pub mod emitter;
pub mod sink;
pub mod sinks;
pub mod types;

pub use emitter::{Delivery, DeliveryStats, MetricsEmitter};
pub use sink::{MetricDeliveryError, MetricsSink};
pub use sinks::{InMemorySink, LogSink, NullSink};
pub use types::{Dimensions, MetricSample, MetricType, MetricUnit};

#[cfg(feature = "cloudwatch")]
pub use sinks::CloudWatchSink;
