//! Orchestrator operation outcome types.

use super::Stage;

/// How an asynchronous orchestrator operation ended.
///
/// Remote failures are not errors at this level: they roll the loop back and
/// are reported here and in the loop state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Request succeeded and the loop advanced to this stage
    Settled(Stage),
    /// Request failed and the loop returned to this stage
    RolledBack { stage: Stage, error: String },
    /// Loop was reset while the request was in flight, response dropped
    Discarded,
}

impl Outcome {
    /// Returns true if the loop advanced
    pub fn is_settled(&self) -> bool {
        matches!(self, Outcome::Settled(_))
    }

    /// Failure message, if the operation rolled back
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::RolledBack { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_variants() {
        assert!(Outcome::Settled(Stage::Assigned).is_settled());
        assert!(!Outcome::Discarded.is_settled());

        let rolled = Outcome::RolledBack {
            stage: Stage::Idle,
            error: "Failed to start loop".into(),
        };
        assert!(!rolled.is_settled());
        assert_eq!(rolled.error(), Some("Failed to start loop"));
    }

    #[test]
    fn test_outcome_error_absent() {
        assert_eq!(Outcome::Settled(Stage::Testing).error(), None);
        assert_eq!(Outcome::Discarded.error(), None);
    }
}
