//! The `examscore init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("examscore.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("exams")?;
    write_if_missing(Path::new("exams/example.toml"), EXAMPLE_EXAM)?;

    std::fs::create_dir_all("submissions")?;
    write_if_missing(Path::new("submissions/example.json"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Edit exams/example.toml with your own questions");
    println!("  2. Run: examscore validate --exam exams/example.toml");
    println!("  3. Run: examscore score --exam exams/example.toml --answers submissions/example.json");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# examscore configuration

# Minimum percentage that counts as a pass, for exams without their own
pass_threshold = 60

# Compare answers ignoring letter case (whitespace still matters)
case_insensitive = false

output_dir = "./examscore-results"
"#;

const EXAMPLE_EXAM: &str = r#"[exam]
id = "example"
title = "Example Grammar Exam"
description = "A short example exam to get started"

[exam.course]
id = "english-101"
name = "English 101"

[[questions]]
id = "question1"
title = "Choose the correct option to complete the sentence: '___ apple a day keeps the doctor away.'"
options = ["An", "A", "The", "None"]
correct_answer = "An"
marks = 5

[[questions]]
id = "question2"
title = "Select the correct article: '___ Eiffel Tower is located in Paris.'"
options = ["A", "The", "An", "None"]
correct_answer = "The"
marks = 5

[[questions]]
id = "question3"
title = "Identify the correct tense: 'They ___ dinner before he arrived.'"
options = ["have had", "has had", "had had", "have"]
correct_answer = "had had"
marks = 5
page = 2
"#;

const EXAMPLE_ANSWERS: &str = r#"{
  "question1": "An",
  "question2": "The",
  "question3": "have had"
}
"#;
