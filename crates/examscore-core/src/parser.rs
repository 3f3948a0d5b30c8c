//! TOML exam definition parser.
//!
//! Loads exams (question content plus grading key) from TOML files and
//! directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{CourseRef, Exam, ExamQuestion, PaperQuestion, QuestionType};

/// Intermediate TOML structure for parsing exam files.
#[derive(Debug, Deserialize)]
struct TomlExamFile {
    exam: TomlExamHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlExamHeader {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    pass_threshold: Option<u32>,
    #[serde(default)]
    course: Option<TomlCourse>,
}

#[derive(Debug, Deserialize)]
struct TomlCourse {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    title: String,
    #[serde(default)]
    question_type: Option<String>,
    options: Vec<String>,
    correct_answer: String,
    marks: u32,
    #[serde(default = "default_true")]
    required: bool,
    #[serde(default = "default_page")]
    page: u32,
}

fn default_true() -> bool {
    true
}

fn default_page() -> u32 {
    1
}

/// Parse a single TOML file into an `Exam`.
pub fn parse_exam(path: &Path) -> Result<Exam> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exam file: {}", path.display()))?;

    parse_exam_str(&content, path)
}

/// Parse a TOML string into an `Exam` (useful for testing).
pub fn parse_exam_str(content: &str, source_path: &Path) -> Result<Exam> {
    let parsed: TomlExamFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    if let Some(threshold) = parsed.exam.pass_threshold {
        anyhow::ensure!(
            threshold <= 100,
            "exam '{}': pass_threshold must be between 0 and 100, got {threshold}",
            parsed.exam.id
        );
    }

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let question_type = q
                .question_type
                .map(|t| t.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
                .transpose()?
                .unwrap_or(QuestionType::Radio);

            anyhow::ensure!(q.marks > 0, "question '{}': marks must be positive", q.id);
            anyhow::ensure!(
                q.options.iter().all(|o| !o.trim().is_empty()),
                "question '{}': all options must be filled",
                q.id
            );
            anyhow::ensure!(
                q.options.contains(&q.correct_answer),
                "question '{}': correct_answer '{}' is not one of its options",
                q.id,
                q.correct_answer
            );
            anyhow::ensure!(q.page >= 1, "question '{}': page numbers start at 1", q.id);

            Ok(ExamQuestion {
                content: PaperQuestion {
                    id: q.id,
                    title: q.title,
                    question_type,
                    options: q.options,
                    marks: q.marks,
                    required: q.required,
                    page: q.page,
                },
                correct_answer: q.correct_answer,
            })
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid exam definition: {}", source_path.display()))?;

    check_exam_keys(&questions)
        .with_context(|| format!("invalid exam definition: {}", source_path.display()))?;

    Ok(Exam {
        id: parsed.exam.id,
        title: parsed.exam.title,
        description: parsed.exam.description,
        course: parsed.exam.course.map(|c| CourseRef {
            id: c.id,
            name: c.name,
        }),
        pass_threshold: parsed.exam.pass_threshold,
        questions,
    })
}

/// Question ids must name one answer slot each, and the marks must fit in a `u32` total.
fn check_exam_keys(questions: &[ExamQuestion]) -> Result<()> {
    let mut seen_ids = HashSet::new();
    let mut total = 0u32;
    for q in questions {
        anyhow::ensure!(
            seen_ids.insert(q.content.id.as_str()),
            "duplicate question ID: {}",
            q.content.id
        );
        total = total.checked_add(q.content.marks).ok_or_else(|| {
            anyhow::anyhow!("question '{}': total marks overflow", q.content.id)
        })?;
    }
    Ok(())
}

/// Recursively load all `.toml` exam files from a directory.
pub fn load_exam_directory(dir: &Path) -> Result<Vec<Exam>> {
    let mut exams = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            exams.extend(load_exam_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_exam(&path) {
                Ok(exam) => exams.push(exam),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(exams)
}

/// A warning from exam validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate an exam for issues that do not stop it from being scored.
pub fn validate_exam(exam: &Exam) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if exam.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "exam has no questions and cannot be scored".into(),
        });
    }

    for q in &exam.questions {
        let content = &q.content;

        if content.options.len() < 2 {
            warnings.push(ValidationWarning {
                question_id: Some(content.id.clone()),
                message: format!("only {} option(s) offered", content.options.len()),
            });
        }

        let mut seen_options = HashSet::new();
        for option in &content.options {
            if !seen_options.insert(option) {
                warnings.push(ValidationWarning {
                    question_id: Some(content.id.clone()),
                    message: format!("duplicate option: {option}"),
                });
            }
        }

        if content.title.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(content.id.clone()),
                message: "question title is empty".into(),
            });
        }
    }

    warnings
}
