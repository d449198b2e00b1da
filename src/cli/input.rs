//! Input collection and validation for the command line.
//!
//! The orchestrator trusts its callers, so the checks a form would make live
//! here: a positive student id, at least one topic, and non-blank answers.

use eyre::{Context, Result, bail};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use tutor_loop::domain::{Answer, Exam};

use super::render::question_label;

/// Split comma separated values, trim them and drop empties
pub fn normalize_topics(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(String::from)
        .collect()
}

/// Pick the student id from the flag or the configured default
pub fn resolve_student_id(flag: Option<u64>, default: Option<u64>) -> Result<u64> {
    match flag.or(default) {
        Some(id) if id > 0 => Ok(id),
        _ => bail!("Please provide a valid Student ID (a positive integer)"),
    }
}

/// Validate the start-loop form
pub fn validate_start(student_id: Option<u64>, default: Option<u64>, raw_topics: &[String]) -> Result<(u64, Vec<String>)> {
    let student_id = resolve_student_id(student_id, default)?;
    let topics = normalize_topics(raw_topics);
    if topics.is_empty() {
        bail!("Please provide at least one topic");
    }
    Ok((student_id, topics))
}

/// Read answers from a YAML list of `{question_id, answer_text}`
pub fn load_answers(path: &Path) -> Result<Vec<Answer>> {
    let content =
        fs::read_to_string(path).context(format!("Failed to read answers file {}", path.display()))?;
    let answers: Vec<Answer> = serde_yaml::from_str(&content).context("Failed to parse answers file")?;
    Ok(answers)
}

/// Ask for one answer per question; blank lines skip the question
pub fn prompt_answers<R: BufRead, W: Write>(exam: &Exam, mut input: R, mut output: W) -> io::Result<Vec<Answer>> {
    let mut answers = Vec::new();
    for question in &exam.questions {
        write!(output, "{}: ", question_label(question))?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if !text.is_empty() {
            answers.push(Answer::new(question.id, text));
        }
    }
    Ok(answers)
}
