//! The `examscore paper` command.

use std::path::PathBuf;

use anyhow::Result;

use examscore_core::parser;

pub fn execute(exam_path: PathBuf, page: Option<u32>) -> Result<()> {
    let exam = parser::parse_exam(&exam_path)?;

    let mut paper = exam.paper();
    if let Some(page) = page {
        anyhow::ensure!(
            (1..=exam.page_count()).contains(&page),
            "page {page} does not exist, exam '{}' has {} page(s)",
            exam.id,
            exam.page_count()
        );
        paper = paper.page(page);
    }

    println!("{}", serde_json::to_string_pretty(&paper)?);
    Ok(())
}
