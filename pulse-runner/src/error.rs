//! Runner error types

use pulse_http::HttpError;
use thiserror::Error;

pub type RunnerResult<T> = Result<T, RunnerError>;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Invalid test configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Invalid trigger message: {0}")]
    InvalidMessage(#[from] serde_json::Error),

    #[error("Request could not be issued: {0}")]
    Request(#[from] HttpError),

    #[error("Test loop has already been started")]
    AlreadyStarted,
}
