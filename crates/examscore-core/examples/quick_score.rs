//! Quick score example: minimal programmatic usage of examscore.
//!
//! Loads an exam definition and a submission, rejects the attempt if a
//! required question is unanswered, and prints the result.
//!
//! ```bash
//! cargo run -p examscore-core --example quick_score
//! cargo run -p examscore-core --example quick_score -- exams/javascript-basics.toml answers.json
//! ```

use std::env;
use std::path::PathBuf;

use examscore_core::config::ExamscoreConfig;
use examscore_core::model::Submission;
use examscore_core::{compute_score_with, parser, validate_submission};

const SAMPLE_EXAM: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../exams/english-grammar.toml");
const SAMPLE_ANSWERS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../submissions/english-grammar-pass.json"
);

fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let exam_path = PathBuf::from(args.next().unwrap_or_else(|| SAMPLE_EXAM.into()));
    let answers_path = PathBuf::from(args.next().unwrap_or_else(|| SAMPLE_ANSWERS.into()));

    let exam = parser::parse_exam(&exam_path)?;
    println!(
        "Loaded exam: {} ({} questions, {} marks)",
        exam.title,
        exam.total_questions(),
        exam.total_marks()
    );

    let submission: Submission = serde_json::from_str(&std::fs::read_to_string(&answers_path)?)?;

    // Refuse to score until every required question has an answer
    validate_submission(&exam.paper_questions(), &submission)?;

    let policy = ExamscoreConfig::default().policy_for(&exam)?;
    let result = compute_score_with(&exam.answer_key(), &submission, &policy)?;

    println!(
        "  Marks: {} out of {} ({} correct)",
        result.obtained_marks,
        result.total_marks,
        result.correct_count()
    );
    println!(
        "  Percentage: {}% (pass mark {}%)",
        result.percentage, result.pass_threshold
    );
    println!("  Passed: {}", result.passed);

    for outcome in result.outcomes.iter().filter(|o| !o.correct) {
        println!(
            "  missed {}: answered {:?}",
            outcome.question_id,
            outcome.submitted.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
