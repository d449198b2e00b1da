//! Wire schemas for the loop API
//!
//! Responses are decoded eagerly into these types; anything that does not
//! match is a decode failure rather than a partially filled record.

use serde::{Deserialize, Serialize};

use crate::domain::{Answer, Exam, ExamResult, LearningPack, Question, Weakness};

/// Body of `POST /api/loop`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLoopRequest {
    pub student_id: u64,
    pub topics: Vec<String>,
}

/// Response of `POST /api/loop`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLoopResponse {
    pub loop_id: u64,
    pub student_id: u64,
    pub learning_pack_id: u64,
}

impl CreateLoopResponse {
    pub fn learning_pack(&self) -> LearningPack {
        LearningPack {
            pack_id: self.learning_pack_id,
        }
    }
}

/// Response of `POST /api/loop/{loop_id}/generate-test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateTestResponse {
    pub mock_exam_id: u64,
    pub questions: Vec<QuestionPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub id: u64,
    pub question_number: String,
    #[serde(default)]
    pub max_marks: Option<u32>,
}

impl From<QuestionPayload> for Question {
    fn from(payload: QuestionPayload) -> Self {
        Self {
            id: payload.id,
            number: payload.question_number,
            max_marks: payload.max_marks,
        }
    }
}

impl From<GenerateTestResponse> for Exam {
    fn from(response: GenerateTestResponse) -> Self {
        Self {
            exam_id: response.mock_exam_id,
            questions: response.questions.into_iter().map(Question::from).collect(),
        }
    }
}

/// Body of `POST /api/loop/{loop_id}/submit-test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitTestRequest {
    pub answers: Vec<Answer>,
}

/// Response of `POST /api/loop/{loop_id}/submit-test`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitTestResponse {
    pub total_score: f64,
    pub max_score: f64,
    #[serde(default)]
    pub weaknesses: Vec<Weakness>,
}

impl From<SubmitTestResponse> for ExamResult {
    fn from(response: SubmitTestResponse) -> Self {
        Self {
            total_score: response.total_score,
            max_score: response.max_score,
            weaknesses: response.weaknesses,
        }
    }
}
