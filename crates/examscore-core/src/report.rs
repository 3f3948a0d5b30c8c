//! Attempt reports: one scored submission with its metadata, persisted as
//! JSON.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{CourseRef, Exam, ScoreResult, Submission};

/// A persisted exam attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    /// Unique attempt identifier.
    pub id: Uuid,
    /// When the attempt was submitted.
    pub created_at: DateTime<Utc>,
    /// Learner name, when the host knows it.
    #[serde(default)]
    pub learner: Option<String>,
    /// Summary of the exam (without the answer key).
    pub exam: ExamSummary,
    #[serde(default)]
    pub time_taken_minutes: Option<u32>,
    /// The answers as submitted.
    pub submission: Submission,
    pub score: ScoreResult,
}

/// Summary of an exam (without question content or answers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub course: Option<CourseRef>,
    pub question_count: usize,
    pub total_marks: u32,
}

impl From<&Exam> for ExamSummary {
    fn from(exam: &Exam) -> Self {
        Self {
            id: exam.id.clone(),
            title: exam.title.clone(),
            course: exam.course.clone(),
            question_count: exam.total_questions(),
            total_marks: exam.total_marks(),
        }
    }
}

/// Pass/fail status shown in result listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    Passed,
    Failed,
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptStatus::Passed => write!(f, "passed"),
            AttemptStatus::Failed => write!(f, "failed"),
        }
    }
}

impl AttemptReport {
    /// Build a fresh report for a just-scored attempt.
    pub fn new(exam: &Exam, submission: Submission, score: ScoreResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            learner: None,
            exam: ExamSummary::from(exam),
            time_taken_minutes: None,
            submission,
            score,
        }
    }

    pub fn with_learner(mut self, learner: impl Into<String>) -> Self {
        self.learner = Some(learner.into());
        self
    }

    pub fn with_time_taken(mut self, minutes: u32) -> Self {
        self.time_taken_minutes = Some(minutes);
        self
    }

    pub fn status(&self) -> AttemptStatus {
        if self.score.passed {
            AttemptStatus::Passed
        } else {
            AttemptStatus::Failed
        }
    }

    /// The sentence shown to the learner after submitting.
    pub fn verdict_message(&self) -> &'static str {
        match self.status() {
            AttemptStatus::Passed => "Congratulations! You have passed the exam.",
            AttemptStatus::Failed => "Sorry, you did not pass the exam. Please try again.",
        }
    }

    /// File name used when saving, e.g. `english-grammar-<uuid>.json`.
    pub fn file_stem(&self) -> String {
        format!("{}-{}", self.exam.id, self.id)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AttemptReport = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse report JSON: {}", path.display()))?;
        Ok(report)
    }
}

/// Load every `.json` attempt report in a directory, oldest first.
///
/// Files that are not attempt reports are skipped with a warning.
pub fn load_report_directory(dir: &Path) -> Result<Vec<AttemptReport>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut reports = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        match AttemptReport::load_json(&path) {
            Ok(report) => reports.push(report),
            Err(e) => tracing::warn!("skipping {}: {:#}", path.display(), e),
        }
    }

    reports.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    Ok(reports)
}
