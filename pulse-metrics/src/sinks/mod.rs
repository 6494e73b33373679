//! Concrete metrics sinks

pub mod log;
pub mod memory;

#[cfg(feature = "cloudwatch")]
pub mod cloudwatch;

pub use self::log::{LogSink, NullSink};
pub use memory::InMemorySink;

#[cfg(feature = "cloudwatch")]
pub use cloudwatch::CloudWatchSink;
