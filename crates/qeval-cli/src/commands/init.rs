//! The `qeval init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("qeval.toml").exists() {
        println!("qeval.toml already exists, skipping.");
    } else {
        std::fs::write("qeval.toml", SAMPLE_CONFIG)?;
        println!("Created qeval.toml");
    }

    std::fs::create_dir_all("question-sets")?;
    let example_path = std::path::Path::new("question-sets/example.toml");
    if example_path.exists() {
        println!("question-sets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTION_SET)?;
        println!("Created question-sets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: qeval validate --questions question-sets/example.toml");
    println!("  2. Run: qeval eval --questions question-sets/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# qeval configuration

output_dir = "./qeval-results"
default_format = "text"
undo_depth = 0
"#;

const EXAMPLE_QUESTION_SET: &str = r#"[question_set]
id = "example"
name = "Example Question Set"
subject = "Physics"
grade = 11
description = "A small question set to get started"

[[questions]]
id = "newton-first-law"
text = "State Newton's first law of motion."
topic = "Mechanics"
marks = 2
difficulty = "easy"
type = "short"
section = "A"

[[questions]]
id = "projectile-range"
text = "Derive the range of a projectile launched at angle theta."
topic = "Mechanics Kinematics"
marks = 5
difficulty = "hard"
type = "long"
section = "B"

[[questions]]
id = "snell-law"
text = "A ray enters glass at 30 degrees. Find the refraction angle."
topic = "Optics"
marks = 3
difficulty = "medium"
type = "short"
section = "A"

[pattern]
total_marks = 9

[[pattern.sections]]
name = "A"

[[pattern.sections.question_types]]
type = "short"
count = 2
marks_each = 2

[[pattern.sections]]
name = "B"

[[pattern.sections.question_types]]
type = "long"
count = 1
marks_each = 5
"#;
