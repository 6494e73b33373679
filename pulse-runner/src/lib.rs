//! # Pulse runner
//!
//! Drives a [`TestCaseSet`] against a target API for a bounded duration.
//! Each pass runs every case in listed order through the [`RequestExecutor`],
//! checks the decoded body against the case's expected partial document, and
//! reports status, latency and pass/fail samples through a
//! [`pulse_metrics::MetricsEmitter`].
//!
//! ```no_run
//! use pulse_runner::{TestConfig, TestLoopController, TriggerMessage};
//! use pulse_http::HttpManager;
//! use pulse_metrics::LogSink;
//! use std::sync::Arc;
//!
//! # async fn example(target: pulse_config::TargetConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let message = TriggerMessage::from_json(
//!     r#"{"Config": {"IntervalInSec": 5, "DurationInSec": 60},
//!         "TestData": [{"type": "predict", "resource": "predict",
//!                       "request": {"x": 1}, "response": {"success": true}, "interval": 1}]}"#,
//! )?;
//! let (config, cases) = message.into_parts(&target)?;
//! let controller = TestLoopController::new(config, Arc::new(HttpManager::new()?), Arc::new(LogSink));
//! let report = controller.run(&cases).await?;
//! println!("{} repetitions", report.repetitions);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
mod de;
pub mod error;
pub mod executor;
pub mod test_case;
pub mod trigger;
pub mod validator;

pub use config::{TestConfig, TestConfigBuilder};
pub use controller::{LoopState, RunReport, TestLoopController};
pub use error::{RunnerError, RunnerResult};
pub use executor::{RequestExecutor, RequestFailure, RequestOutcome};
pub use test_case::{TestCase, TestCaseSet};
pub use trigger::{LoopSettings, TriggerMessage};
pub use validator::{validate, Mismatch, Validation};

pub use tokio_util::sync::CancellationToken;
