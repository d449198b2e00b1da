//! Error types for tutor-loop
//!
//! Centralized error handling using thiserror. Remote failures are not raised
//! by the orchestrator operations; they are recorded in the loop state. The
//! variants here cover caller errors and local plumbing.

use thiserror::Error;

use crate::api::ApiError;
use crate::domain::Stage;

/// All error types that can occur in tutor-loop
#[derive(Debug, Error)]
pub enum LoopError {
    /// Operation invoked outside the stage it requires
    #[error("Cannot {operation} while loop is {stage}")]
    InvalidStage { operation: &'static str, stage: Stage },

    /// API client could not be built or used
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for tutor-loop operations
pub type Result<T> = std::result::Result<T, LoopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_stage_error() {
        let err = LoopError::InvalidStage {
            operation: "generate test",
            stage: Stage::Idle,
        };
        assert_eq!(err.to_string(), "Cannot generate test while loop is idle");
    }

    #[test]
    fn test_api_error_conversion() {
        let err: LoopError = ApiError::Transport("connection refused".to_string()).into();
        assert!(matches!(err, LoopError::Api(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LoopError = io_err.into();
        assert!(matches!(err, LoopError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: LoopError = json_err.into();
        assert!(matches!(err, LoopError::Json(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("{not: a list").unwrap_err();
        let err: LoopError = yaml_err.into();
        assert!(matches!(err, LoopError::Yaml(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(LoopError::InvalidStage {
                operation: "submit test",
                stage: Stage::Assigned,
            })
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
