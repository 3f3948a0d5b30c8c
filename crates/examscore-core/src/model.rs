//! Core data model types for examscore.
//!
//! An [`Exam`] holds both the public question content and the grading key.
//! The two are split before anything reaches a learner: [`Exam::paper`]
//! yields content without answers and [`Exam::answer_key`] yields the
//! records the scorer consumes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A grading-key record: what the scorer needs to know about one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Key naming this question within a submission.
    pub id: String,
    /// The single answer value considered correct.
    pub correct_answer: String,
    /// Point value, always positive for a well-formed exam.
    pub marks: u32,
}

impl Question {
    pub fn new(id: impl Into<String>, correct_answer: impl Into<String>, marks: u32) -> Self {
        Self {
            id: id.into(),
            correct_answer: correct_answer.into(),
            marks,
        }
    }
}

/// How a question presents its options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Single choice.
    #[default]
    Radio,
    /// Rendered as checkboxes; the answer is still compared as one string.
    Checkbox,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Radio => write!(f, "radio"),
            QuestionType::Checkbox => write!(f, "checkbox"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "radio" | "single" | "multiple-choice" => Ok(QuestionType::Radio),
            "checkbox" | "multiple" => Ok(QuestionType::Checkbox),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// Public question content. Never carries the correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperQuestion {
    pub id: String,
    /// The question text shown to the learner.
    pub title: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub marks: u32,
    /// Whether the learner must answer before submitting.
    pub required: bool,
    /// 1-based page the question is shown on.
    pub page: u32,
}

/// A question as defined by an exam author: content plus its answer.
///
/// [`crate::parser`] guarantees unique ids, an answer among the options, and marks that fit a `u32` total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamQuestion {
    pub content: PaperQuestion,
    pub correct_answer: String,
}

impl ExamQuestion {
    /// The grading-key half of this question.
    pub fn key(&self) -> Question {
        Question {
            id: self.content.id.clone(),
            correct_answer: self.correct_answer.clone(),
            marks: self.content.marks,
        }
    }
}

/// The course an exam belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: String,
    pub name: String,
}

/// A named collection of questions tied to a course.
#[derive(Debug, Clone)]
pub struct Exam {
    pub id: String,
    pub title: String,
    pub description: String,
    pub course: Option<CourseRef>,
    /// Per-exam pass threshold in percent; falls back to the global one.
    pub pass_threshold: Option<u32>,
    pub questions: Vec<ExamQuestion>,
}

impl Exam {
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Sum of all question marks, saturating at `u32::MAX`.
    ///
    /// Parsed exams never saturate: the parser rejects totals that overflow.
    pub fn total_marks(&self) -> u32 {
        sum_marks(self.questions.iter().map(|q| q.content.marks))
    }

    /// The grading key, in question order.
    pub fn answer_key(&self) -> Vec<Question> {
        self.questions.iter().map(ExamQuestion::key).collect()
    }

    /// Public content of every question, in question order.
    pub fn paper_questions(&self) -> Vec<PaperQuestion> {
        self.questions.iter().map(|q| q.content.clone()).collect()
    }

    /// The learner-facing view of this exam.
    pub fn paper(&self) -> ExamPaper {
        ExamPaper {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            course: self.course.clone(),
            total_marks: self.total_marks(),
            questions: self.paper_questions(),
        }
    }

    /// Number of pages, i.e. the highest page any question sits on.
    pub fn page_count(&self) -> u32 {
        self.questions
            .iter()
            .map(|q| q.content.page)
            .max()
            .unwrap_or(0)
    }
}

fn sum_marks(marks: impl Iterator<Item = u32>) -> u32 {
    marks.fold(0u32, u32::saturating_add)
}

/// An exam as shown to the learner: no grading key.
#[derive(Debug, Clone, Serialize)]
pub struct ExamPaper {
    pub id: String,
    pub title: String,
    pub description: String,
    pub course: Option<CourseRef>,
    /// Marks available across the questions in `questions`.
    pub total_marks: u32,
    pub questions: Vec<PaperQuestion>,
}

impl ExamPaper {
    /// Keep only the questions on the given page; `total_marks` then covers that page.
    pub fn page(mut self, page: u32) -> Self {
        self.questions.retain(|q| q.page == page);
        self.total_marks = sum_marks(self.questions.iter().map(|q| q.marks));
        self
    }
}

/// A learner's answers for one attempt, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(BTreeMap<String, String>);

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the answer for a question.
    pub fn answer(&mut self, question_id: impl Into<String>, answer: impl Into<String>) {
        self.0.insert(question_id.into(), answer.into());
    }

    /// The submitted answer for a question, if any.
    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Submission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// How one question fared in a scored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: String,
    #[serde(default)]
    pub submitted: Option<String>,
    pub correct: bool,
    pub awarded: u32,
    pub available: u32,
}

/// The computed outcome for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub obtained_marks: u32,
    pub total_marks: u32,
    /// `round(obtained / total * 100)`, half rounded up.
    pub percentage: u32,
    pub passed: bool,
    /// The threshold `passed` was decided against.
    pub pass_threshold: u32,
    #[serde(default)]
    pub outcomes: Vec<QuestionOutcome>,
}

impl ScoreResult {
    pub fn correct_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.correct).count()
    }
}
