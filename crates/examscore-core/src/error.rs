//! Scoring error types.
//!
//! These errors are deterministic and recoverable by correcting the input:
//! the scorer never guesses a fallback percentage, and the submission gate
//! never scores a partial attempt.

use thiserror::Error;

/// Errors raised by the scoring engine and the submission gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// The question set cannot produce a percentage (no questions, or zero
    /// total marks), or a policy value is out of range.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// One or more required questions have no answer.
    #[error("incomplete submission: {} unanswered question(s): {}", .missing.len(), .missing.join(", "))]
    IncompleteSubmission { missing: Vec<String> },
}

impl ScoringError {
    /// Returns the unanswered question ids for an incomplete submission.
    pub fn missing_questions(&self) -> &[String] {
        match self {
            ScoringError::IncompleteSubmission { missing } => missing,
            ScoringError::InvalidInput(_) => &[],
        }
    }
}
