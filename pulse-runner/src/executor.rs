//! Timed request execution
//!
//! [`RequestExecutor::request_post`] issues one POST, classifies the result
//! and emits exactly two samples for it: `StatusSuccess` or `StatusError`,
//! then `ResponseTime`. The status is decided before the body is decoded, and
//! latency is reported for every outcome including transport failures.

use crate::error::{RunnerError, RunnerResult};
use pulse_http::{build_url, ApiCredentials, HttpClient, PostRequest};
use pulse_metrics::{MetricType, MetricsEmitter};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

const SUCCESS_STATUS: u16 = 200;

/// Why a request produced no usable body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// No HTTP response was obtained
    Transport { message: String },
    /// Any status other than 200
    NonSuccessStatus { status: u16 },
    /// 200 with a body that is not JSON
    MalformedBody { message: String },
}

/// Result of one executed request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutcome {
    /// `None` when the request failed before a response arrived
    pub http_status: Option<u16>,
    /// Decoded body, present only for a 200 with valid JSON
    pub response_body: Option<JsonValue>,
    pub latency_ms: f64,
    pub failure: Option<RequestFailure>,
}

impl RequestOutcome {
    pub fn is_status_success(&self) -> bool {
        self.http_status == Some(SUCCESS_STATUS)
    }
}

pub struct RequestExecutor {
    client: Arc<dyn HttpClient>,
    emitter: Arc<MetricsEmitter>,
}

impl RequestExecutor {
    pub fn new(client: Arc<dyn HttpClient>, emitter: Arc<MetricsEmitter>) -> Self {
        Self { client, emitter }
    }

    /// POST `request_body` to `endpoint + resource_path`.
    ///
    /// `Err` means the request could not be built (bad URL or header); no
    /// metrics are emitted in that case since nothing was sent.
    pub async fn request_post(
        &self,
        type_tag: &str,
        endpoint: &str,
        resource_path: &str,
        credentials: &ApiCredentials,
        request_body: &JsonValue,
    ) -> RunnerResult<RequestOutcome> {
        let url = build_url(endpoint, resource_path)?;
        let request = PostRequest::json(url, request_body.clone()).credentials(credentials);

        let started = Instant::now();
        let result = self.client.post_json(&request).await;
        let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

        let outcome = match result {
            Ok(response) if response.status == SUCCESS_STATUS => {
                self.emitter
                    .emit(MetricType::StatusSuccess, 1.0, type_tag)
                    .await;

                match serde_json::from_str::<JsonValue>(&response.body) {
                    Ok(body) => {
                        debug!("request_post: response - body - {}", body);
                        RequestOutcome {
                            http_status: Some(response.status),
                            response_body: Some(body),
                            latency_ms,
                            failure: None,
                        }
                    }
                    Err(e) => {
                        warn!(
                            "request_post: response - malformed JSON body for {}: {}",
                            type_tag, e
                        );
                        RequestOutcome {
                            http_status: Some(response.status),
                            response_body: None,
                            latency_ms,
                            failure: Some(RequestFailure::MalformedBody {
                                message: e.to_string(),
                            }),
                        }
                    }
                }
            }
            Ok(response) => {
                debug!(
                    "request_post: non-success body for {}: {}",
                    type_tag, response.body
                );
                self.emitter.emit(MetricType::StatusError, 1.0, type_tag).await;
                RequestOutcome {
                    http_status: Some(response.status),
                    response_body: None,
                    latency_ms,
                    failure: Some(RequestFailure::NonSuccessStatus {
                        status: response.status,
                    }),
                }
            }
            Err(e) if e.is_transport() => {
                warn!("request_post: transport failure for {}: {}", type_tag, e);
                self.emitter.emit(MetricType::StatusError, 1.0, type_tag).await;
                RequestOutcome {
                    http_status: None,
                    response_body: None,
                    latency_ms,
                    failure: Some(RequestFailure::Transport {
                        message: e.to_string(),
                    }),
                }
            }
            Err(e) => return Err(RunnerError::Request(e)),
        };

        info!("request_post: response time - {:.3}ms", latency_ms);
        self.emitter
            .emit(MetricType::ResponseTime, latency_ms, type_tag)
            .await;

        Ok(outcome)
    }
}
