//! Loop state read model
//!
//! `LoopState` is what presentation layers see. They get owned snapshots and
//! never a mutable reference; only the orchestrator writes it.

use serde::Serialize;

use crate::domain::{Exam, ExamResult, LearningPack, Stage};

/// Full state of the current loop
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoopState {
    pub stage: Stage,
    /// Last user-facing failure message
    pub error: Option<String>,
    pub loop_id: Option<u64>,
    pub student_id: Option<u64>,
    pub learning_pack: Option<LearningPack>,
    pub exam: Option<Exam>,
    pub result: Option<ExamResult>,
    /// Incremented by every reset
    pub epoch: u64,
}

/// The record a presentation layer should render for the current stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StagePayload<'a> {
    None,
    Pack(&'a LearningPack),
    Exam(&'a Exam),
    Result(&'a ExamResult),
}

impl LoopState {
    /// Fresh state for the given epoch
    pub(crate) fn initial(epoch: u64) -> Self {
        Self {
            epoch,
            ..Default::default()
        }
    }

    /// True when every field other than the epoch holds its initial value
    pub fn is_initial(&self) -> bool {
        *self == Self::initial(self.epoch)
    }

    pub fn payload(&self) -> StagePayload<'_> {
        let payload = match self.stage {
            Stage::Idle | Stage::Assigning => None,
            Stage::Assigned | Stage::GeneratingExam => self.learning_pack.as_ref().map(StagePayload::Pack),
            Stage::Testing | Stage::Diagnosing => self.exam.as_ref().map(StagePayload::Exam),
            Stage::Finished => self.result.as_ref().map(StagePayload::Result),
        };
        payload.unwrap_or(StagePayload::None)
    }

    /// Check that the populated records are exactly the ones the stage implies
    pub fn is_consistent(&self) -> bool {
        let has_loop = self.loop_id.is_some() && self.student_id.is_some() && self.learning_pack.is_some();
        match self.stage {
            Stage::Idle | Stage::Assigning => {
                self.loop_id.is_none()
                    && self.student_id.is_none()
                    && self.learning_pack.is_none()
                    && self.exam.is_none()
                    && self.result.is_none()
            }
            Stage::Assigned | Stage::GeneratingExam => has_loop && self.exam.is_none() && self.result.is_none(),
            Stage::Testing | Stage::Diagnosing => has_loop && self.exam.is_some() && self.result.is_none(),
            Stage::Finished => has_loop && self.exam.is_some() && self.result.is_some(),
        }
    }
}
