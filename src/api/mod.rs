//! Remote loop API layer
//!
//! This module provides:
//! - Wire schemas for the three loop endpoints
//! - LoopApi trait for API abstraction
//! - HttpLoopApi implementation over reqwest
//! - MockLoopApi with scripted responses for tests and demos

pub mod client;
pub mod http;
pub mod mock;
pub mod types;

pub use client::{ApiError, LoopApi};
pub use http::{HttpApiConfig, HttpLoopApi};
pub use mock::{ApiCall, MockLoopApi};
pub use types::{
    CreateLoopRequest, CreateLoopResponse, GenerateTestResponse, QuestionPayload, SubmitTestRequest,
    SubmitTestResponse,
};
