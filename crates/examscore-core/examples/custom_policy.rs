//! Custom policy example: score a key built in code under different policies.
//!
//! Shows how the pass threshold and answer matching change the verdict for
//! the same submission.
//!
//! ```bash
//! cargo run -p examscore-core --example custom_policy
//! ```

use examscore_core::{compute_score, compute_score_with, MatchMode, Question, ScoringPolicy, Submission};

fn main() -> anyhow::Result<()> {
    let key = vec![
        Question::new("typeof-null", "object", 10),
        Question::new("strict-equality", "===", 10),
        Question::new("block-scope", "let", 10),
        Question::new("array-length", "length", 5),
    ];

    let submission: Submission = [
        ("typeof-null", "Object"),
        ("strict-equality", "==="),
        ("block-scope", "LET"),
        ("array-length", "length"),
    ]
    .into_iter()
    .collect();

    let policies = [
        ("default (exact, 60%)", ScoringPolicy::default()),
        (
            "case-insensitive, 60%",
            ScoringPolicy::default().with_match_mode(MatchMode::CaseInsensitive),
        ),
        (
            "case-insensitive, 90%",
            ScoringPolicy::new(90, MatchMode::CaseInsensitive)?,
        ),
    ];

    println!("{:<26} {:<10} {:<6} {:<6}", "Policy", "Marks", "Pct", "Pass");
    println!("{}", "-".repeat(50));

    for (name, policy) in &policies {
        let result = compute_score_with(&key, &submission, policy)?;
        println!(
            "{:<26} {:<10} {:<6} {:<6}",
            name,
            format!("{}/{}", result.obtained_marks, result.total_marks),
            format!("{}%", result.percentage),
            result.passed
        );
    }

    // The plain entry point is the default policy
    let plain = compute_score(&key, &submission)?;
    assert_eq!(plain.percentage, 43);

    Ok(())
}
