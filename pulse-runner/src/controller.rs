//! Test loop controller
//!
//! Runs the full test case set, checks the elapsed time, sleeps for the
//! configured interval and repeats. The duration check happens only after a
//! complete repetition, so a set is always executed at least once and a slow
//! repetition may overrun the configured duration.
//!
//! A [`CancellationToken`] can end the run early. It is observed before each
//! case and while sleeping, never in the middle of an in-flight request.

use crate::config::TestConfig;
use crate::error::{RunnerError, RunnerResult};
use crate::executor::{RequestExecutor, RequestFailure, RequestOutcome};
use crate::test_case::{TestCase, TestCaseSet};
use crate::validator::{validate, Validation};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use pulse_http::HttpClient;
use pulse_metrics::{MetricType, MetricsEmitter, MetricsSink};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Tallies for one run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub started_at: Option<DateTime<Utc>>,
    /// Fully executed passes over the case set
    pub repetitions: u64,
    /// Requests that reached the executor's timing window
    pub requests: u64,
    pub status_success: u64,
    pub status_error: u64,
    pub transport_errors: u64,
    pub malformed_bodies: u64,
    pub test_success: u64,
    pub test_fail: u64,
    /// Cases that could not be executed at all
    pub case_errors: u64,
    pub metric_delivery_failures: u64,
    #[serde(with = "millis")]
    pub elapsed: Duration,
    pub state: Option<LoopState>,
}

impl RunReport {
    fn record_outcome(&mut self, outcome: &RequestOutcome) {
        self.requests += 1;
        if outcome.is_status_success() {
            self.status_success += 1;
        } else {
            self.status_error += 1;
        }
        match outcome.failure {
            Some(RequestFailure::Transport { .. }) => self.transport_errors += 1,
            Some(RequestFailure::MalformedBody { .. }) => self.malformed_bodies += 1,
            _ => {}
        }
    }
}

enum Flow {
    Continue,
    Cancelled,
}

pub struct TestLoopController {
    config: TestConfig,
    executor: RequestExecutor,
    emitter: Arc<MetricsEmitter>,
    state: Mutex<LoopState>,
}

impl TestLoopController {
    /// The HTTP client and metrics sink are owned by this controller for the
    /// whole run. Samples go to the `project_name` namespace, tagged with
    /// `project_stage`.
    pub fn new(
        config: TestConfig,
        client: Arc<dyn HttpClient>,
        sink: Arc<dyn MetricsSink>,
    ) -> Self {
        let emitter = Arc::new(MetricsEmitter::new(
            sink,
            config.project_name(),
            config.project_stage(),
        ));
        let executor = RequestExecutor::new(client, emitter.clone());

        Self {
            config,
            executor,
            emitter,
            state: Mutex::new(LoopState::Idle),
        }
    }

    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        *self.state.lock()
    }

    /// Run until the configured duration has elapsed
    pub async fn run(&self, test_cases: &TestCaseSet) -> RunnerResult<RunReport> {
        self.run_until_cancelled(test_cases, CancellationToken::new())
            .await
    }

    /// Run until the configured duration has elapsed or `token` is cancelled
    pub async fn run_until_cancelled(
        &self,
        test_cases: &TestCaseSet,
        token: CancellationToken,
    ) -> RunnerResult<RunReport> {
        {
            let mut state = self.state.lock();
            if *state != LoopState::Idle {
                return Err(RunnerError::AlreadyStarted);
            }
            *state = LoopState::Running;
        }

        info!(
            "Starting test loop {} for {}s every {}s with {} test cases",
            self.config.test_name(),
            self.config.duration_seconds(),
            self.config.interval_seconds(),
            test_cases.len()
        );

        let start_time = Instant::now();
        let duration = self.config.duration();
        let mut report = RunReport {
            started_at: Some(Utc::now()),
            ..RunReport::default()
        };

        let final_state = loop {
            if let Flow::Cancelled = self.execute_tests(test_cases, &token, &mut report).await {
                break LoopState::Cancelled;
            }
            report.repetitions += 1;

            if start_time.elapsed() >= duration {
                break LoopState::Completed;
            }

            debug!("Repetition {} finished, sleeping", report.repetitions);
            if let Flow::Cancelled = pause(self.config.interval(), &token).await {
                break LoopState::Cancelled;
            }
        };

        report.elapsed = start_time.elapsed();
        report.metric_delivery_failures = self.emitter.stats().failed();
        report.state = Some(final_state);
        *self.state.lock() = final_state;

        info!(
            "Test loop {} {:?} after {} repetitions ({} requests, {} passed, {} failed)",
            self.config.test_name(),
            final_state,
            report.repetitions,
            report.requests,
            report.test_success,
            report.test_fail
        );

        Ok(report)
    }

    /// One repetition: every case in order, each followed by its own pause
    async fn execute_tests(
        &self,
        test_cases: &TestCaseSet,
        token: &CancellationToken,
        report: &mut RunReport,
    ) -> Flow {
        for test_case in test_cases {
            if token.is_cancelled() {
                return Flow::Cancelled;
            }

            if let Err(e) = self.execute_case(test_case, report).await {
                error!(
                    "Test case {} could not be executed: {}",
                    test_case.case_type, e
                );
                report.case_errors += 1;
            }

            if let Flow::Cancelled = pause(test_case.interval(), token).await {
                return Flow::Cancelled;
            }
        }
        Flow::Continue
    }

    async fn execute_case(&self, test_case: &TestCase, report: &mut RunReport) -> RunnerResult<()> {
        let type_tag = test_case.type_tag(self.config.test_name());
        let resource_path = test_case.request_path(self.config.project_stage());

        let outcome = self
            .executor
            .request_post(
                &type_tag,
                self.config.endpoint(),
                &resource_path,
                self.config.credentials(),
                &test_case.request_body,
            )
            .await?;
        report.record_outcome(&outcome);

        let Some(ref body) = outcome.response_body else {
            return Ok(());
        };

        match validate(&test_case.expected_response, body) {
            Validation::Pass => {
                report.test_success += 1;
                self.emitter
                    .emit(MetricType::TestSuccess, 1.0, &type_tag)
                    .await;
            }
            Validation::Fail(mismatch) => {
                error!("start_request_with_timer: response compare - {}", mismatch);
                report.test_fail += 1;
                self.emitter.emit(MetricType::TestFail, 1.0, &type_tag).await;
            }
        }

        Ok(())
    }
}

/// Sleep for `duration` unless `token` is cancelled first
async fn pause(duration: Duration, token: &CancellationToken) -> Flow {
    if duration.is_zero() {
        tokio::task::yield_now().await;
        return if token.is_cancelled() {
            Flow::Cancelled
        } else {
            Flow::Continue
        };
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Flow::Cancelled,
        _ = tokio::time::sleep(duration) => Flow::Continue,
    }
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}
