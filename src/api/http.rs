//! HTTP client for the loop API
//!
//! This module implements the LoopApi trait over reqwest against the JSON
//! endpoints under `{base_url}/api/loop`.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::client::{ApiError, LoopApi};
use super::types::{CreateLoopRequest, CreateLoopResponse, GenerateTestResponse, SubmitTestRequest, SubmitTestResponse};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    pub base_url: String,
    /// No timeout when None; a hung request stays in flight
    pub timeout: Option<Duration>,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl HttpApiConfig {
    /// Create a new config with a specific base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// reqwest-backed loop API client
#[derive(Debug, Clone)]
pub struct HttpLoopApi {
    client: Client,
    config: HttpApiConfig,
}

impl HttpLoopApi {
    /// Create a new client
    pub fn new(config: HttpApiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Absolute URL for a path under the base URL
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send a request and decode a success body into `T`
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        debug!("API responded with {}", status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = if error_body.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                error_body
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl LoopApi for HttpLoopApi {
    async fn create_loop(&self, request: &CreateLoopRequest) -> Result<CreateLoopResponse, ApiError> {
        let url = self.endpoint("/api/loop");
        debug!("POST {} for student {}", url, request.student_id);
        self.send(self.client.post(url).json(request)).await
    }

    async fn generate_test(&self, loop_id: u64) -> Result<GenerateTestResponse, ApiError> {
        let url = self.endpoint(&format!("/api/loop/{}/generate-test", loop_id));
        debug!("POST {}", url);
        self.send(self.client.post(url)).await
    }

    async fn submit_test(&self, loop_id: u64, request: &SubmitTestRequest) -> Result<SubmitTestResponse, ApiError> {
        let url = self.endpoint(&format!("/api/loop/{}/submit-test", loop_id));
        debug!("POST {} with {} answers", url, request.answers.len());
        self.send(self.client.post(url).json(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_config_with_base_url() {
        let config = HttpApiConfig::with_base_url("http://tutor.example:9000");
        assert_eq!(config.base_url, "http://tutor.example:9000");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let api = HttpLoopApi::new(HttpApiConfig::with_base_url("http://localhost:8000/")).unwrap();
        assert_eq!(api.endpoint("/api/loop"), "http://localhost:8000/api/loop");

        let api = HttpLoopApi::new(HttpApiConfig::with_base_url("http://localhost:8000")).unwrap();
        assert_eq!(
            api.endpoint("/api/loop/42/generate-test"),
            "http://localhost:8000/api/loop/42/generate-test"
        );
    }

    #[test]
    fn test_client_with_timeout() {
        let config = HttpApiConfig {
            timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        let api = HttpLoopApi::new(config).unwrap();
        assert_eq!(api.base_url(), DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Grab a free port, then close it so nothing is listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let api = HttpLoopApi::new(HttpApiConfig::with_base_url(format!("http://127.0.0.1:{}", port))).unwrap();
        let result = api.generate_test(1).await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpLoopApi>();
    }
}
