//! Aggregate statistics over stored exam attempts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::report::AttemptReport;

/// Statistics across every attempt, grouped by exam.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultStats {
    /// Per-exam statistics keyed by exam id.
    pub per_exam: BTreeMap<String, ExamStats>,
}

/// Statistics for a single exam across all of its attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamStats {
    pub exam_id: String,
    pub title: String,
    pub attempts: usize,
    pub passed: usize,
    /// Fraction of attempts that passed, 0.0..=1.0.
    pub pass_rate: f64,
    pub average_percentage: f64,
    pub highest_percentage: u32,
    pub lowest_percentage: u32,
}

/// Compute per-exam statistics from a set of attempt reports.
pub fn compute_result_stats(reports: &[AttemptReport]) -> ResultStats {
    let mut grouped: BTreeMap<&str, Vec<&AttemptReport>> = BTreeMap::new();
    for r in reports {
        grouped.entry(r.exam.id.as_str()).or_default().push(r);
    }

    let per_exam = grouped
        .into_iter()
        .map(|(exam_id, attempts)| {
            let n = attempts.len();
            let passed = attempts.iter().filter(|r| r.score.passed).count();
            let percentages: Vec<u32> = attempts.iter().map(|r| r.score.percentage).collect();
            let sum: u64 = percentages.iter().map(|&p| u64::from(p)).sum();

            let stats = ExamStats {
                exam_id: exam_id.to_string(),
                title: attempts[0].exam.title.clone(),
                attempts: n,
                passed,
                pass_rate: passed as f64 / n as f64,
                average_percentage: sum as f64 / n as f64,
                highest_percentage: percentages.iter().copied().max().unwrap_or(0),
                lowest_percentage: percentages.iter().copied().min().unwrap_or(0),
            };
            (exam_id.to_string(), stats)
        })
        .collect();

    ResultStats { per_exam }
}
