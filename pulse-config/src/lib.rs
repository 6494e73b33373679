//! Domain-driven configuration management for Pulse
//!
//! Configuration is split by functional domain (target API, HTTP client,
//! metrics backend, logging), each with serde defaults, validation and
//! environment variable overrides.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    http::HttpConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    metrics::{MetricsBackend, MetricsConfig},
    target::TargetConfig,
    PulseConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
