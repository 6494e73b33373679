//! HTTP client implementation

use crate::config::HttpConfig;
use crate::errors::HttpError;
use crate::types::{HttpResponse, PostRequest};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Client,
};
use std::str::FromStr;
use tracing::{debug, info};

/// HTTP client trait for issuing JSON POST requests
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// Send the request and read the whole response body.
    ///
    /// Any response, whatever its status, is `Ok`; `Err` means no response
    /// was obtained.
    async fn post_json(&self, request: &PostRequest) -> Result<HttpResponse, HttpError>;
}

/// reqwest-backed [`HttpClient`] holding one connection pool
#[derive(Debug, Clone)]
pub struct HttpManager {
    client: Client,
    config: HttpConfig,
}

impl HttpManager {
    /// Create a new HttpManager with default configuration
    pub fn new() -> Result<Self, HttpError> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a new HttpManager with specific configuration
    pub fn with_config(config: HttpConfig) -> Result<Self, HttpError> {
        debug!(
            "Creating HttpManager with timeout: {}s",
            config.timeout.as_secs()
        );
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| HttpError::ConfigError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn header_map(request: &PostRequest) -> Result<HeaderMap, HttpError> {
        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (key, value) in &request.headers {
            let header_name = HeaderName::from_str(key).map_err(|e| HttpError::InvalidHeader {
                name: key.clone(),
                reason: e.to_string(),
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader {
                name: key.clone(),
                reason: e.to_string(),
            })?;
            header_map.insert(header_name, header_value);
        }

        Ok(header_map)
    }
}

#[async_trait::async_trait]
impl HttpClient for HttpManager {
    async fn post_json(&self, request: &PostRequest) -> Result<HttpResponse, HttpError> {
        let headers = Self::header_map(request)?;
        let payload = serde_json::to_vec(&request.body)?;

        info!("request_post: request - endpoint - {}", request.url);
        debug!("Request body: {}", request.body);

        let response = self
            .client
            .post(request.url.clone())
            .headers(headers)
            .body(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        info!("request_post: response - status_code - {}", status);
        debug!("Response body: {} bytes", body.len());

        Ok(HttpResponse { status, body })
    }
}
