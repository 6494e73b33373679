//! Request and response types

use crate::errors::HttpError;
use reqwest::Url;
use serde_json::Value as JsonValue;

/// Header carrying the API key, as API Gateway expects it
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying the caller's auth token
pub const AUTH_TOKEN_HEADER: &str = "Authentication";

/// Optional credentials attached to every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiCredentials {
    pub api_key: Option<String>,
    pub auth_token: Option<String>,
}

impl ApiCredentials {
    pub fn new(api_key: Option<String>, auth_token: Option<String>) -> Self {
        Self { api_key, auth_token }
    }

    /// Headers to add for the credentials that are present
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(2);
        if let Some(ref key) = self.api_key {
            headers.push((API_KEY_HEADER, key.clone()));
        }
        if let Some(ref token) = self.auth_token {
            headers.push((AUTH_TOKEN_HEADER, token.clone()));
        }
        headers
    }
}

/// A JSON POST request ready to be sent
#[derive(Debug, Clone)]
pub struct PostRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: JsonValue,
}

impl PostRequest {
    pub fn json(url: Url, body: JsonValue) -> Self {
        Self {
            url,
            headers: Vec::new(),
            body,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn credentials(mut self, credentials: &ApiCredentials) -> Self {
        for (name, value) in credentials.headers() {
            self.headers.push((name.to_string(), value));
        }
        self
    }
}

/// Fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Join an endpoint and a resource path into a request URL.
///
/// A bare host gets `https://`; an endpoint that already names an http(s)
/// scheme is used as given. Exactly one `/` separates the two parts.
pub fn build_url(endpoint: &str, resource_path: &str) -> Result<Url, HttpError> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(HttpError::InvalidUrl("endpoint is empty".to_string()));
    }

    let base = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("https://{}", endpoint)
    };

    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        resource_path.trim_start_matches('/')
    );

    let url = Url::parse(&joined).map_err(|e| HttpError::InvalidUrl(format!("{}: {}", joined, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(HttpError::InvalidUrl(format!(
            "unsupported scheme '{}' in {}",
            other, joined
        ))),
    }
}
