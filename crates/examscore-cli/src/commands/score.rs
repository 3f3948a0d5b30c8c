//! The `examscore score` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use examscore_core::config::load_config_from;
use examscore_core::model::Submission;
use examscore_core::parser;
use examscore_core::report::AttemptReport;
use examscore_core::scoring::{compute_score_with, MatchMode};
use examscore_core::validation::{answers_outside_options, unknown_answers, validate_submission};
use examscore_report::html::write_attempt_html;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    exam_path: PathBuf,
    answers_path: PathBuf,
    learner: Option<String>,
    time_taken: Option<u32>,
    threshold: Option<u32>,
    case_insensitive: bool,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let exam = parser::parse_exam(&exam_path)?;
    for w in parser::validate_exam(&exam) {
        match &w.question_id {
            Some(id) => tracing::warn!("[{id}] {}", w.message),
            None => tracing::warn!("{}", w.message),
        }
    }

    let submission = load_submission(&answers_path)?;
    let paper = exam.paper_questions();

    for id in unknown_answers(&paper, &submission) {
        tracing::warn!("ignoring answer for unknown question '{id}'");
    }
    for off in answers_outside_options(&paper, &submission) {
        tracing::warn!(
            "[{}] answer '{}' is not one of the offered options",
            off.question_id,
            off.answer
        );
    }

    validate_submission(&paper, &submission)
        .context("submission rejected, answer every required question and submit again")?;

    let mut policy = config.policy_for(&exam)?;
    if let Some(t) = threshold {
        policy = policy.with_threshold(t)?;
    }
    if case_insensitive {
        policy = policy.with_match_mode(MatchMode::CaseInsensitive);
    }

    let score = compute_score_with(&exam.answer_key(), &submission, &policy)
        .with_context(|| format!("failed to score exam '{}'", exam.id))?;

    let mut report = AttemptReport::new(&exam, submission, score);
    if let Some(name) = learner {
        report = report.with_learner(name);
    }
    if let Some(minutes) = time_taken {
        report = report.with_time_taken(minutes);
    }

    print_summary(&report);

    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let formats: Vec<&str> = match format.as_str() {
        "all" => vec!["json", "html"],
        "none" => vec![],
        other => other.split(',').map(str::trim).collect(),
    };

    for fmt in formats {
        match fmt {
            "json" => {
                let path = output.join(format!("{}.json", report.file_stem()));
                report.save_json(&path)?;
                tracing::info!("report saved to {}", path.display());
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("{}.html", report.file_stem()));
                write_attempt_html(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn load_submission(path: &Path) -> Result<Submission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| {
        format!(
            "failed to parse answers (expected a JSON object of question id to answer): {}",
            path.display()
        )
    })
}

fn print_summary(report: &AttemptReport) {
    use comfy_table::{Cell, Table};

    let score = &report.score;

    let mut table = Table::new();
    table.set_header(vec!["Question", "Answer", "Result", "Marks"]);
    for outcome in &score.outcomes {
        table.add_row(vec![
            Cell::new(&outcome.question_id),
            Cell::new(outcome.submitted.as_deref().unwrap_or("-")),
            Cell::new(if outcome.correct { "correct" } else { "incorrect" }),
            Cell::new(format!("{}/{}", outcome.awarded, outcome.available)),
        ]);
    }

    println!("Exam: {}", report.exam.title);
    println!("{table}");
    println!(
        "Marks: {} out of {}",
        score.obtained_marks, score.total_marks
    );
    println!(
        "Percentage: {}% (pass mark {}%)",
        score.percentage, score.pass_threshold
    );
    println!("{}", report.verdict_message());
}
