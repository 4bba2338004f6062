//! The `qeval eval` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use qeval_core::parser;
use qeval_core::report::StatsReport;
use qeval_core::statistics::StoreStats;
use qeval_core::QuestionStore;

use crate::config::load_config_from;

pub struct EvalArgs {
    pub questions: PathBuf,
    pub undo: Option<usize>,
    pub topic: Option<String>,
    pub format: Option<String>,
    pub save: bool,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn execute(args: EvalArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;

    let format = args.format.unwrap_or(config.default_format);
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format '{format}', expected text or json"
    );

    let mut sets = parser::load_question_sets(&args.questions)?;
    anyhow::ensure!(
        !sets.is_empty(),
        "no question sets found in {}",
        args.questions.display()
    );

    if let Some(topic) = &args.topic {
        for set in &mut sets {
            set.retain_topic(topic);
        }
    }

    let mut store = QuestionStore::new();
    for set in &sets {
        tracing::info!(set = %set.id, questions = set.questions.len(), "loading question set");
        for q in &set.questions {
            let question = q.to_question();
            store.add_question(question.marks, question.difficulty);
        }
    }

    let undo = args.undo.unwrap_or(config.undo_depth);
    let undone = (0..undo)
        .map_while(|_| store.undo_last_question())
        .count();

    let stats = store.stats();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        for set in &sets {
            println!("Question set: {} ({} questions)", set.name, set.questions.len());
        }
        if undone > 0 {
            println!(
                "Undid {undone} question(s); {} still counted in the aggregates",
                stats.stale_count()
            );
        }
        print_summary(&stats);
    }

    if args.save || args.output.is_some() {
        let output = args.output.unwrap_or(config.output_dir);
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = output.join(format!("stats-{timestamp}.json"));
        StatsReport::new(&sets, stats, undone).save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(stats: &StoreStats) {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Questions"),
        Cell::new(stats.question_count),
    ]);
    table.add_row(vec![Cell::new("History"), Cell::new(stats.history_len)]);
    table.add_row(vec![
        Cell::new("Total marks"),
        Cell::new(stats.total_marks),
    ]);
    table.add_row(vec![
        Cell::new("Average difficulty"),
        Cell::new(stats.average_difficulty),
    ]);
    table.add_row(vec![
        Cell::new("Top question marks"),
        Cell::new(stats.top_question_marks),
    ]);
    println!("\n{table}");

    if stats.by_difficulty.is_empty() {
        return;
    }

    let mut breakdown = Table::new();
    breakdown.set_header(vec!["Difficulty", "Questions", "Marks"]);
    for (difficulty, bucket) in stats.by_difficulty.iter().rev() {
        breakdown.add_row(vec![
            Cell::new(difficulty),
            Cell::new(bucket.count),
            Cell::new(bucket.marks),
        ]);
    }
    println!("\n{breakdown}");
}
