//! The `examscore results` command.

use std::path::PathBuf;

use anyhow::Result;

use examscore_core::config::load_config_from;
use examscore_core::report::{load_report_directory, AttemptReport};
use examscore_core::statistics::{compute_result_stats, ResultStats};
use examscore_report::html::write_results_html;

pub fn execute(
    dir: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (dir, explicit) = match dir {
        Some(dir) => (dir, true),
        None => (load_config_from(config_path.as_deref())?.output_dir, false),
    };

    // The default output dir only appears once something has been scored
    let reports = if !explicit && !dir.exists() {
        tracing::debug!("{} does not exist yet", dir.display());
        Vec::new()
    } else {
        load_report_directory(&dir)?
    };
    let stats = compute_result_stats(&reports);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        "html" => {
            let path = output.unwrap_or_else(|| dir.join("results.html"));
            write_results_html(&reports, &path)?;
            eprintln!("HTML report: {}", path.display());
        }
        _ => print_results(&reports, &stats),
    }

    Ok(())
}

fn print_results(reports: &[AttemptReport], stats: &ResultStats) {
    use comfy_table::{Cell, Table};

    if reports.is_empty() {
        println!("No attempts found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Student Name",
        "Test Name",
        "Score",
        "Time Taken (min)",
        "Submitted At",
        "Status",
    ]);
    for r in reports {
        table.add_row(vec![
            Cell::new(r.learner.as_deref().unwrap_or("-")),
            Cell::new(&r.exam.title),
            Cell::new(format!("{}%", r.score.percentage)),
            Cell::new(
                r.time_taken_minutes
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(r.created_at.format("%Y-%m-%d %H:%M")),
            Cell::new(r.status().to_string().to_uppercase()),
        ]);
    }
    println!("{table}");

    let mut summary = Table::new();
    summary.set_header(vec![
        "Exam",
        "Attempts",
        "Pass Rate",
        "Average",
        "Highest",
        "Lowest",
    ]);
    for exam in stats.per_exam.values() {
        summary.add_row(vec![
            Cell::new(&exam.title),
            Cell::new(exam.attempts),
            Cell::new(format!("{:.1}%", exam.pass_rate * 100.0)),
            Cell::new(format!("{:.1}%", exam.average_percentage)),
            Cell::new(format!("{}%", exam.highest_percentage)),
            Cell::new(format!("{}%", exam.lowest_percentage)),
        ]);
    }
    println!("\n{summary}");
}
