//! Domain types for tutor-loop
//!
//! This module contains the core domain types:
//! - Stage: position of a loop in its assign, test, diagnose lifecycle
//! - LearningPack, Exam, Question: records produced by the remote system
//! - Answer: ephemeral input collected before submission
//! - ExamResult, Weakness: the diagnosed outcome
//! - Outcome: how an orchestrator operation ended

pub mod outcome;
pub mod records;
pub mod stage;

pub use outcome::Outcome;
pub use records::{Answer, Exam, ExamResult, LearningPack, Question, Weakness};
pub use stage::Stage;
