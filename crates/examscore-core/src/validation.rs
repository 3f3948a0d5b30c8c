//! Submission checks that run before scoring.
//!
//! The scorer accepts any submission; it is the caller's job to refuse an
//! attempt that leaves required questions unanswered and to prompt the
//! learner to finish instead.

use crate::error::ScoringError;
use crate::model::{PaperQuestion, Submission};

/// Reject a submission that leaves any required question unanswered.
///
/// An answer that is absent, empty or only whitespace counts as
/// unanswered. The error lists every missing id in question order.
pub fn validate_submission(
    questions: &[PaperQuestion],
    submission: &Submission,
) -> Result<(), ScoringError> {
    let missing: Vec<String> = questions
        .iter()
        .filter(|q| q.required)
        .filter(|q| {
            submission
                .get(&q.id)
                .map_or(true, |answer| answer.trim().is_empty())
        })
        .map(|q| q.id.clone())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ScoringError::IncompleteSubmission { missing })
    }
}

/// Submission keys that name no question in the exam.
pub fn unknown_answers(questions: &[PaperQuestion], submission: &Submission) -> Vec<String> {
    submission
        .iter()
        .filter(|(id, _)| !questions.iter().any(|q| q.id == *id))
        .map(|(id, _)| id.to_string())
        .collect()
}

/// An answer that is not one of the options the question offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffOptionAnswer {
    pub question_id: String,
    pub answer: String,
}

/// Answers that were never on offer. They are still scored (and simply
/// never match a well-formed key) but usually point at a broken form.
pub fn answers_outside_options(
    questions: &[PaperQuestion],
    submission: &Submission,
) -> Vec<OffOptionAnswer> {
    questions
        .iter()
        .filter_map(|q| {
            let answer = submission.get(&q.id)?;
            if answer.trim().is_empty() || q.options.iter().any(|o| o == answer) {
                return None;
            }
            Some(OffOptionAnswer {
                question_id: q.id.clone(),
                answer: answer.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionType;

    fn question(id: &str, required: bool) -> PaperQuestion {
        PaperQuestion {
            id: id.into(),
            title: format!("Question {id}"),
            question_type: QuestionType::Radio,
            options: vec!["if".into(), "which".into(), "who".into()],
            marks: 5,
            required,
            page: 1,
        }
    }

    #[test]
    fn complete_submission_passes() {
        let questions = vec![question("q1", true), question("q2", true)];
        let submission: Submission = [("q1", "if"), ("q2", "who")].into_iter().collect();
        assert!(validate_submission(&questions, &submission).is_ok());
    }

    #[test]
    fn missing_and_blank_answers_are_reported_in_order() {
        let questions = vec![
            question("q1", true),
            question("q2", true),
            question("q3", true),
            question("q4", true),
        ];
        let submission: Submission = [("q1", "if"), ("q3", "   "), ("q4", "")]
            .into_iter()
            .collect();

        let err = validate_submission(&questions, &submission).unwrap_err();
        assert_eq!(
            err,
            ScoringError::IncompleteSubmission {
                missing: vec!["q2".into(), "q3".into(), "q4".into()]
            }
        );
    }

    #[test]
    fn optional_questions_may_be_skipped() {
        let questions = vec![question("q1", true), question("q2", false)];
        let submission: Submission = [("q1", "which")].into_iter().collect();
        assert!(validate_submission(&questions, &submission).is_ok());
    }

    #[test]
    fn wrong_answers_still_count_as_answered() {
        let questions = vec![question("q1", true)];
        let submission: Submission = [("q1", "definitely not an option")].into_iter().collect();
        assert!(validate_submission(&questions, &submission).is_ok());
    }

    #[test]
    fn stray_answers_are_listed() {
        let questions = vec![question("q1", true)];
        let submission: Submission = [("q1", "if"), ("q7", "who"), ("bonus", "x")]
            .into_iter()
            .collect();
        assert_eq!(unknown_answers(&questions, &submission), vec!["bonus", "q7"]);
    }

    #[test]
    fn off_option_answers_are_listed() {
        let questions = vec![question("q1", true), question("q2", true), question("q3", true)];
        let submission: Submission = [("q1", "if"), ("q2", "If"), ("q3", "")]
            .into_iter()
            .collect();

        let off = answers_outside_options(&questions, &submission);
        assert_eq!(
            off,
            vec![OffOptionAnswer {
                question_id: "q2".into(),
                answer: "If".into(),
            }]
        );
    }
}
