//! tutor-loop - client-side orchestration of the tutoring loop
//!
//! A student is assigned a learning pack, takes a generated mock exam and gets
//! a diagnosed result. The `LoopOrchestrator` owns the loop's stage, calls the
//! remote API for each transition and rolls back on failure.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod orchestrator;

pub use error::{LoopError, Result};
pub use orchestrator::{LoopOrchestrator, LoopState};
