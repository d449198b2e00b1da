//! Loop lifecycle stages
//!
//! A loop moves `Idle -> Assigning -> Assigned -> GeneratingExam -> Testing
//! -> Diagnosing -> Finished`. The `-ing` stages are in flight: a request is
//! outstanding and the stage settles or rolls back once it resolves. Only
//! `reset` leaves `Finished`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current position of a loop in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// No loop started
    #[default]
    Idle,
    /// Create-loop request outstanding
    Assigning,
    /// Learning pack assigned
    Assigned,
    /// Generate-test request outstanding
    GeneratingExam,
    /// Exam in progress, awaiting answers
    Testing,
    /// Submit-test request outstanding
    Diagnosing,
    /// Result diagnosed
    Finished,
}

impl Stage {
    /// Every stage, in lifecycle order
    pub const ALL: [Stage; 7] = [
        Stage::Idle,
        Stage::Assigning,
        Stage::Assigned,
        Stage::GeneratingExam,
        Stage::Testing,
        Stage::Diagnosing,
        Stage::Finished,
    ];

    /// Labels of the progress indicator steps
    pub const STEP_LABELS: [&'static str; 4] = ["Assign", "Test", "Diagnose", "Finished"];

    /// Returns true while a request is outstanding
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Stage::Assigning | Stage::GeneratingExam | Stage::Diagnosing)
    }

    /// Index into `STEP_LABELS` for the progress indicator, None before a loop starts
    pub fn progress_step(&self) -> Option<usize> {
        match self {
            Stage::Idle => None,
            Stage::Assigning | Stage::Assigned => Some(0),
            Stage::GeneratingExam | Stage::Testing => Some(1),
            Stage::Diagnosing => Some(2),
            Stage::Finished => Some(3),
        }
    }

    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Assigning => "assigning",
            Stage::Assigned => "assigned",
            Stage::GeneratingExam => "generating_exam",
            Stage::Testing => "testing",
            Stage::Diagnosing => "diagnosing",
            Stage::Finished => "finished",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
