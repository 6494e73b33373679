//! Configuration error types

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Malformed YAML config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// An environment override that could not be parsed
    #[error("Bad environment override: {0}")]
    EnvError(String),

    #[error("Invalid {domain} configuration: {message}")]
    DomainError { domain: String, message: String },
}
