//! Terminal rendering of loop state.

use colored::*;

use tutor_loop::LoopState;
use tutor_loop::domain::{ExamResult, LearningPack, Question, Stage};

/// Progress indicator, or None before a loop starts
pub fn progress_line(stage: Stage) -> Option<String> {
    let active = stage.progress_step()?;
    let steps: Vec<String> = Stage::STEP_LABELS
        .iter()
        .enumerate()
        .map(|(index, label)| {
            if index < active {
                format!("✓ {}", label).green().to_string()
            } else if index == active {
                format!("[{}] {}", index + 1, label).cyan().bold().to_string()
            } else {
                format!("{} {}", index + 1, label).dimmed().to_string()
            }
        })
        .collect();
    Some(steps.join(" → "))
}

/// Message shown while a request is outstanding
pub fn loading_message(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::Assigning => Some("Assigning learning pack..."),
        Stage::GeneratingExam => Some("Generating mock exam..."),
        Stage::Diagnosing => Some("Submitting and diagnosing..."),
        _ => None,
    }
}

pub fn question_label(question: &Question) -> String {
    match question.max_marks {
        Some(marks) => format!("Question {} ({} marks)", question.number, marks),
        None => format!("Question {}", question.number),
    }
}

pub fn assignment_summary(state: &LoopState, pack: &LearningPack) -> String {
    let loop_id = state.loop_id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
    format!(
        "{} loop {} for student {}, learning pack {}",
        "Assigned:".green(),
        loop_id,
        state.student_id.unwrap_or_default(),
        pack.pack_id
    )
}

/// Results and diagnosis view
pub fn results_dashboard(result: &ExamResult) -> String {
    let mut lines = vec![
        "Results & Diagnosis".bold().to_string(),
        format!(
            "Score: {} ({:.1}%)",
            format!("{:.1} / {:.1}", result.total_score, result.max_score).bold(),
            result.percentage()
        ),
    ];

    if result.weaknesses.is_empty() {
        lines.push(
            "Excellent work! No significant weaknesses were diagnosed."
                .green()
                .to_string(),
        );
    } else {
        lines.push("Areas to improve:".yellow().to_string());
        for weakness in &result.weaknesses {
            lines.push(format!(
                "  - Question {}: {}",
                weakness.question_number, weakness.suggestion
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_loop::domain::Weakness;

    #[test]
    fn test_progress_line_hidden_when_idle() {
        assert!(progress_line(Stage::Idle).is_none());
    }

    #[test]
    fn test_progress_line_marks_active_step() {
        let line = progress_line(Stage::Testing).unwrap();
        assert!(line.contains("Assign"));
        assert!(line.contains("[2] Test"));
        assert!(line.contains("Diagnose"));
        assert!(line.contains("Finished"));
    }

    #[test]
    fn test_loading_messages() {
        assert!(loading_message(Stage::Assigning).is_some());
        assert!(loading_message(Stage::GeneratingExam).is_some());
        assert!(loading_message(Stage::Diagnosing).is_some());
        assert!(loading_message(Stage::Testing).is_none());
    }

    #[test]
    fn test_question_label() {
        let question = Question {
            id: 1,
            number: "2b".into(),
            max_marks: Some(4),
        };
        assert_eq!(question_label(&question), "Question 2b (4 marks)");

        let unmarked = Question {
            max_marks: None,
            ..question
        };
        assert_eq!(question_label(&unmarked), "Question 2b");
    }

    #[test]
    fn test_results_dashboard_with_weaknesses() {
        let result = ExamResult {
            total_score: 3.0,
            max_score: 5.0,
            weaknesses: vec![Weakness {
                question_number: "1".into(),
                weakness: "algebra".into(),
                suggestion: "review factoring".into(),
            }],
        };
        let view = results_dashboard(&result);
        assert!(view.contains("3.0 / 5.0"));
        assert!(view.contains("60.0%"));
        assert!(view.contains("review factoring"));
    }

    #[test]
    fn test_results_dashboard_without_weaknesses() {
        let result = ExamResult {
            total_score: 5.0,
            max_score: 5.0,
            weaknesses: vec![],
        };
        let view = results_dashboard(&result);
        assert!(view.contains("No significant weaknesses"));
    }
}
