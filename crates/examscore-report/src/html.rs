//! HTML report generator.
//!
//! Produces self-contained HTML files with all CSS/JS inlined: one page per
//! exam attempt, and a results page listing many attempts.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use examscore_core::report::{AttemptReport, AttemptStatus};
use examscore_core::statistics::{compute_result_stats, ExamStats};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn status_class(status: AttemptStatus) -> &'static str {
    match status {
        AttemptStatus::Passed => "pass",
        AttemptStatus::Failed => "fail",
    }
}

fn page_head(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
}

/// Generate the result page for one attempt.
///
/// The breakdown shows which questions were right and what was submitted,
/// never the correct answer.
pub fn generate_attempt_html(report: &AttemptReport) -> String {
    let mut html = String::new();
    let score = &report.score;
    let status = report.status();

    page_head(&mut html, &format!("Exam results — {}", report.exam.title));

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.exam.title)));
    let course = report
        .exam
        .course
        .as_ref()
        .map(|c| format!("{} | ", html_escape(&c.name)))
        .unwrap_or_default();
    let learner = report
        .learner
        .as_deref()
        .map(|l| format!("{} | ", html_escape(l)))
        .unwrap_or_default();
    html.push_str(&format!(
        "<p class=\"meta\">{}{}{} questions | submitted {}</p>\n",
        course,
        learner,
        report.exam.question_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score summary
    html.push_str(&format!(
        "<section class=\"score {}\">\n",
        status_class(status)
    ));
    html.push_str("<h2>Your Score</h2>\n");
    html.push_str(&format!(
        "<p class=\"marks\">Marks: {} out of {}</p>\n",
        score.obtained_marks, score.total_marks
    ));
    html.push_str(&format!(
        "<p class=\"percentage\">Percentage: {}% (pass mark {}%)</p>\n",
        score.percentage, score.pass_threshold
    ));
    html.push_str(&format!(
        "<p class=\"verdict\"><strong>{}</strong></p>\n",
        report.verdict_message()
    ));
    html.push_str("</section>\n");

    // Per-question breakdown
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Breakdown</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Question</th><th onclick=\"sortTable(1)\">Your answer</th><th onclick=\"sortTable(2)\">Result</th><th onclick=\"sortTable(3)\">Marks</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for outcome in &score.outcomes {
        let class = if outcome.correct { "pass" } else { "fail" };
        let text = if outcome.correct { "correct" } else { "incorrect" };
        let submitted = outcome
            .submitted
            .as_deref()
            .map(html_escape)
            .unwrap_or_else(|| "-".to_string());
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}/{}</td></tr>\n",
            class,
            html_escape(&outcome.question_id),
            submitted,
            text,
            outcome.awarded,
            outcome.available
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");
    html.push_str("</body>\n</html>");
    html
}

/// Write an attempt page to a file.
pub fn write_attempt_html(report: &AttemptReport, path: &Path) -> Result<()> {
    write_html(&generate_attempt_html(report), path)
}

/// Generate a results page listing many attempts, with per-exam statistics.
pub fn generate_results_html(reports: &[AttemptReport]) -> String {
    let mut html = String::new();
    let stats = compute_result_stats(reports);

    page_head(&mut html, "Test Results");

    html.push_str("<header>\n<h1>Test Results</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} attempts | {} exams</p>\n",
        reports.len(),
        stats.per_exam.len()
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Exam</th><th>Attempts</th><th>Pass rate</th><th>Average</th><th>Highest</th><th>Lowest</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for exam in stats.per_exam.values() {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}%</td><td>{:.1}%</td><td>{}%</td><td>{}%</td></tr>\n",
            html_escape(&exam.title),
            exam.attempts,
            exam.pass_rate * 100.0,
            exam.average_percentage,
            exam.highest_percentage,
            exam.lowest_percentage,
        ));
    }
    html.push_str("</tbody></table>\n");

    if !stats.per_exam.is_empty() {
        html.push_str(&generate_bar_chart(&stats.per_exam));
    }
    html.push_str("</section>\n");

    // Attempt listing
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Attempts</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Student Name</th><th onclick=\"sortTable(1)\">Test Name</th><th onclick=\"sortTable(2)\">Score</th><th onclick=\"sortTable(3)\">Time Taken (minutes)</th><th onclick=\"sortTable(4)\">Submitted At</th><th onclick=\"sortTable(5)\">Status</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for r in reports {
        let status = r.status();
        let time_taken = r
            .time_taken_minutes
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}%</td><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
            html_escape(r.learner.as_deref().unwrap_or("-")),
            html_escape(&r.exam.title),
            r.score.percentage,
            time_taken,
            r.created_at.format("%Y-%m-%d %H:%M"),
            status_class(status),
            status.to_string().to_uppercase(),
        ));
    }
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(&stats)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");
    html.push_str("</body>\n</html>");
    html
}

/// Write a results page to a file.
pub fn write_results_html(reports: &[AttemptReport], path: &Path) -> Result<()> {
    write_html(&generate_results_html(reports), path)
}

fn write_html(html: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(per_exam: &BTreeMap<String, ExamStats>) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = per_exam.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, exam) in per_exam.values().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let rate = exam.pass_rate;
        let width = (rate * max_width as f64) as usize;

        let color = if rate >= 0.8 {
            "#22c55e"
        } else if rate >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&exam.title)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}% passed</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            rate * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.score { padding: 1rem 2rem; border-radius: 8px; text-align: center; }
.marks { font-size: 1.25rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, { numeric: true }) : vb.localeCompare(va, undefined, { numeric: true });
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use examscore_core::model::{QuestionOutcome, ScoreResult, Submission};
    use examscore_core::report::ExamSummary;

    fn make_report(learner: &str, obtained: u32, outcomes: Vec<QuestionOutcome>) -> AttemptReport {
        let percentage = obtained * 10;
        AttemptReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            learner: Some(learner.into()),
            exam: ExamSummary {
                id: "grammar".into(),
                title: "English Grammar <Final>".into(),
                course: None,
                question_count: outcomes.len(),
                total_marks: 10,
            },
            time_taken_minutes: Some(55),
            submission: Submission::new(),
            score: ScoreResult {
                obtained_marks: obtained,
                total_marks: 10,
                percentage,
                passed: percentage >= 60,
                pass_threshold: 60,
                outcomes,
            },
        }
    }

    fn outcomes() -> Vec<QuestionOutcome> {
        vec![
            QuestionOutcome {
                question_id: "question1".into(),
                submitted: Some("An".into()),
                correct: true,
                awarded: 5,
                available: 5,
            },
            QuestionOutcome {
                question_id: "question2".into(),
                submitted: Some("Each".into()),
                correct: false,
                awarded: 0,
                available: 5,
            },
        ]
    }

    #[test]
    fn attempt_page_contains_score_and_breakdown() {
        let report = make_report("John Doe", 5, outcomes());
        let html = generate_attempt_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Marks: 5 out of 10"));
        assert!(html.contains("Percentage: 50%"));
        assert!(html.contains("did not pass"));
        assert!(html.contains("question2"));
        assert!(html.contains("English Grammar &lt;Final&gt;"));
        assert!(!html.contains("<Final>"));
    }

    #[test]
    fn results_page_lists_attempts() {
        let reports = vec![
            make_report("John Doe", 9, outcomes()),
            make_report("Jane Smith", 5, outcomes()),
        ];
        let html = generate_results_html(&reports);

        assert!(html.contains("John Doe"));
        assert!(html.contains("Jane Smith"));
        assert!(html.contains("PASSED"));
        assert!(html.contains("FAILED"));
        assert!(html.contains("50.0%"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn html_write_to_file() {
        let report = make_report("John Doe", 10, outcomes());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("attempt.html");

        write_attempt_html(&report, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Congratulations"));

        let listing = dir.path().join("results.html");
        write_results_html(&[report], &listing).unwrap();
        assert!(listing.exists());
    }
}
