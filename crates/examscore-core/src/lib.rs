//! examscore-core — Exam model, scoring engine, and submission validation.
//!
//! This crate defines the exam data model, the pure scoring function, the
//! submission gate that runs before it, and the file formats the rest of
//! examscore builds on.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod statistics;
pub mod validation;

pub use error::ScoringError;
pub use model::{Question, ScoreResult, Submission};
pub use scoring::{compute_score, compute_score_with, MatchMode, ScoringPolicy};
pub use validation::validate_submission;
