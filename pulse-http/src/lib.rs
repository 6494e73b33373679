//! HTTP client functionality for Pulse
//!
//! This crate provides the [`HttpClient`] seam the request executor drives,
//! a reqwest-backed implementation, and helpers for building the JSON POST
//! requests issued against the target API.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-export main types for convenience
pub use client::{HttpClient, HttpManager};
pub use config::HttpConfig;
pub use errors::HttpError;
pub use types::{build_url, ApiCredentials, HttpResponse, PostRequest, API_KEY_HEADER, AUTH_TOKEN_HEADER};
