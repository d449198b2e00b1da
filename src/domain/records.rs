//! Records owned by a loop
//!
//! Each record is produced once by the remote system at a stage transition and
//! never mutated afterwards. `Answer` is the only caller-supplied type.

use serde::{Deserialize, Serialize};

/// Study material assigned at the `Assigned` transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPack {
    pub pack_id: u64,
}

/// A generated mock exam
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    pub exam_id: u64,
    /// Questions in presentation order
    pub questions: Vec<Question>,
}

/// One exam question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    /// Display label, e.g. "1" or "2b"
    pub number: String,
    /// Marks available, if the remote system knows them
    pub max_marks: Option<u32>,
}

impl Exam {
    /// Look up a question by id
    pub fn question(&self, id: u64) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Sum of the known per-question marks
    pub fn total_marks(&self) -> u32 {
        self.questions.iter().filter_map(|q| q.max_marks).sum()
    }
}

/// A student's answer to one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u64,
    #[serde(rename = "answer_text")]
    pub text: String,
}

impl Answer {
    pub fn new(question_id: u64, text: impl Into<String>) -> Self {
        Self {
            question_id,
            text: text.into(),
        }
    }
}

/// Diagnosed outcome of a submitted exam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub total_score: f64,
    pub max_score: f64,
    /// Ordered as reported, may be empty
    pub weaknesses: Vec<Weakness>,
}

/// A per-question gap with an improvement suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weakness {
    pub question_number: String,
    pub weakness: String,
    pub suggestion: String,
}

impl ExamResult {
    /// `total_score / max_score`, or 0.0 when nothing was available to score
    pub fn score_ratio(&self) -> f64 {
        if self.max_score > 0.0 {
            self.total_score / self.max_score
        } else {
            0.0
        }
    }

    /// Score as a percentage
    pub fn percentage(&self) -> f64 {
        self.score_ratio() * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam() -> Exam {
        Exam {
            exam_id: 9,
            questions: vec![
                Question {
                    id: 1,
                    number: "1".into(),
                    max_marks: Some(5),
                },
                Question {
                    id: 2,
                    number: "2a".into(),
                    max_marks: None,
                },
                Question {
                    id: 3,
                    number: "2b".into(),
                    max_marks: Some(3),
                },
            ],
        }
    }

    #[test]
    fn test_exam_question_lookup() {
        let exam = exam();
        assert_eq!(exam.question(2).map(|q| q.number.as_str()), Some("2a"));
        assert!(exam.question(99).is_none());
    }

    #[test]
    fn test_exam_total_marks_skips_unknown() {
        assert_eq!(exam().total_marks(), 8);
    }

    #[test]
    fn test_score_ratio() {
        let result = ExamResult {
            total_score: 3.0,
            max_score: 5.0,
            weaknesses: vec![],
        };
        assert!((result.score_ratio() - 0.6).abs() < f64::EPSILON);
        assert!((result.percentage() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_ratio_zero_max() {
        let result = ExamResult {
            total_score: 0.0,
            max_score: 0.0,
            weaknesses: vec![],
        };
        assert_eq!(result.score_ratio(), 0.0);
        assert_eq!(result.percentage(), 0.0);
    }

    #[test]
    fn test_answer_serializes_wire_field_names() {
        let json = serde_json::to_value(Answer::new(1, "ans")).unwrap();
        assert_eq!(json["question_id"], 1);
        assert_eq!(json["answer_text"], "ans");
    }
}
