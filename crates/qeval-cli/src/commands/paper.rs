//! The `qeval paper` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use qeval_core::paper::assemble_paper;
use qeval_core::parser;

pub fn execute(questions_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let set = parser::parse_question_set(&questions_path)?;
    let paper = assemble_paper(&set)?;

    for s in &paper.shortfalls {
        eprintln!(
            "WARNING: section {} wanted {} {} question(s), found {}",
            s.section, s.wanted, s.kind, s.found
        );
    }

    let stats = paper.stats();
    if paper.total_marks != stats.total_marks {
        eprintln!(
            "WARNING: placed questions carry {} marks but the pattern declares {}",
            stats.total_marks, paper.total_marks
        );
    }
    eprintln!(
        "{} question(s), total marks {}, average difficulty {}, top question {} marks",
        stats.question_count,
        stats.total_marks,
        stats.average_difficulty,
        stats.top_question_marks
    );

    let text = paper.render_text();
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, &text)
                .with_context(|| format!("failed to write paper: {}", path.display()))?;
            eprintln!("Paper written to: {}", path.display());
        }
        None => print!("{text}"),
    }

    Ok(())
}
