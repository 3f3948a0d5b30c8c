//! The exam scoring engine.
//!
//! Scoring is a pure function of the answer key and the submission: marks
//! are summed for every question whose answer matches, the percentage is
//! rounded half-up to an integer, and pass/fail is decided against the
//! policy's threshold.

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::model::{Question, QuestionOutcome, ScoreResult, Submission};

/// Pass threshold, in percent, used when nothing overrides it.
pub const DEFAULT_PASS_THRESHOLD: u32 = 60;

/// How a submitted answer is compared to the correct one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Byte-for-byte equality. No trimming, no case folding.
    #[default]
    Exact,
    /// Equal after lowercasing both sides. Whitespace still matters.
    CaseInsensitive,
}

impl MatchMode {
    pub fn matches(self, submitted: &str, correct: &str) -> bool {
        match self {
            MatchMode::Exact => submitted == correct,
            MatchMode::CaseInsensitive => submitted.to_lowercase() == correct.to_lowercase(),
        }
    }
}

/// Knobs that decide how a submission is graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Minimum percentage that counts as a pass.
    pub pass_threshold: u32,
    #[serde(default)]
    pub match_mode: MatchMode,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            match_mode: MatchMode::Exact,
        }
    }
}

impl ScoringPolicy {
    /// Build a policy, rejecting thresholds above 100%.
    pub fn new(pass_threshold: u32, match_mode: MatchMode) -> Result<Self, ScoringError> {
        if pass_threshold > 100 {
            return Err(ScoringError::InvalidInput(format!(
                "pass threshold must be between 0 and 100, got {pass_threshold}"
            )));
        }
        Ok(Self {
            pass_threshold,
            match_mode,
        })
    }

    pub fn with_threshold(self, pass_threshold: u32) -> Result<Self, ScoringError> {
        Self::new(pass_threshold, self.match_mode)
    }

    pub fn with_match_mode(self, match_mode: MatchMode) -> Self {
        Self { match_mode, ..self }
    }
}

/// Score a submission with the default policy (60%, exact match).
pub fn compute_score(
    questions: &[Question],
    submission: &Submission,
) -> Result<ScoreResult, ScoringError> {
    compute_score_with(questions, submission, &ScoringPolicy::default())
}

/// Score a submission against an answer key.
///
/// Missing answers never match. Fails with [`ScoringError::InvalidInput`]
/// when there are no questions or the total marks are zero, since the
/// percentage is undefined.
pub fn compute_score_with(
    questions: &[Question],
    submission: &Submission,
    policy: &ScoringPolicy,
) -> Result<ScoreResult, ScoringError> {
    if questions.is_empty() {
        return Err(ScoringError::InvalidInput(
            "cannot score an exam with no questions".into(),
        ));
    }

    let mut obtained_marks = 0u32;
    let mut total_marks = 0u32;
    let mut outcomes = Vec::with_capacity(questions.len());

    for question in questions {
        let submitted = submission.get(&question.id);
        let correct = submitted
            .is_some_and(|answer| policy.match_mode.matches(answer, &question.correct_answer));
        let awarded = if correct { question.marks } else { 0 };

        obtained_marks = obtained_marks.checked_add(awarded).ok_or_else(overflow)?;
        total_marks = total_marks.checked_add(question.marks).ok_or_else(overflow)?;

        outcomes.push(QuestionOutcome {
            question_id: question.id.clone(),
            submitted: submitted.map(str::to_string),
            correct,
            awarded,
            available: question.marks,
        });
    }

    if total_marks == 0 {
        return Err(ScoringError::InvalidInput(
            "total marks are zero, percentage is undefined".into(),
        ));
    }

    let percentage = round_percentage(obtained_marks, total_marks);
    let passed = percentage >= policy.pass_threshold;

    tracing::debug!(
        obtained_marks,
        total_marks,
        percentage,
        passed,
        "scored submission"
    );

    Ok(ScoreResult {
        obtained_marks,
        total_marks,
        percentage,
        passed,
        pass_threshold: policy.pass_threshold,
        outcomes,
    })
}

fn overflow() -> ScoringError {
    ScoringError::InvalidInput("total marks overflow".into())
}

/// `round(obtained / total * 100)` with halves rounded up, in integers.
fn round_percentage(obtained: u32, total: u32) -> u32 {
    let obtained = u64::from(obtained);
    let total = u64::from(total);
    ((obtained * 200 + total) / (total * 2)) as u32
}
