//! Core API client trait and error type

use async_trait::async_trait;
use thiserror::Error;

use super::types::{CreateLoopRequest, CreateLoopResponse, GenerateTestResponse, SubmitTestRequest, SubmitTestResponse};

/// One call per loop transition. Implementations must not retry.
#[async_trait]
pub trait LoopApi: Send + Sync {
    /// `POST /api/loop`
    async fn create_loop(&self, request: &CreateLoopRequest) -> Result<CreateLoopResponse, ApiError>;

    /// `POST /api/loop/{loop_id}/generate-test`
    async fn generate_test(&self, loop_id: u64) -> Result<GenerateTestResponse, ApiError>;

    /// `POST /api/loop/{loop_id}/submit-test`
    async fn submit_test(&self, loop_id: u64, request: &SubmitTestRequest) -> Result<SubmitTestResponse, ApiError>;
}

/// A remote operation failure.
///
/// The variants only shape the message; callers treat them all the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not complete
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected schema
    #[error("invalid response: {0}")]
    Decode(String),

    /// The HTTP client could not be built
    #[error("client setup failed: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "API returned 500: Internal Server Error");
    }

    #[test]
    fn test_transport_error_message() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "request failed: connection refused");
    }

    #[test]
    fn test_decode_error_message() {
        let err = ApiError::Decode("missing field `loop_id`".to_string());
        assert!(err.to_string().starts_with("invalid response"));
    }
}
