//! qeval CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "qeval", version, about = "Exam question evaluator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load questions into a store and report its statistics
    Eval {
        /// Path to .toml question set or directory
        #[arg(long)]
        questions: PathBuf,

        /// Undo calls to apply after loading
        #[arg(long)]
        undo: Option<usize>,

        /// Only load questions filed under this topic
        #[arg(long)]
        topic: Option<String>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,

        /// Save a JSON stats report to the output directory
        #[arg(long)]
        save: bool,

        /// Output directory for saved reports
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two stats reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate question set TOML files
    Validate {
        /// Path to question set file or directory
        #[arg(long)]
        questions: PathBuf,
    },

    /// Query the topic index of a question set
    Topics {
        /// Path to question set file or directory
        #[arg(long)]
        questions: PathBuf,

        /// List topics at or below this prefix
        #[arg(long, default_value = "")]
        prefix: String,

        /// Print questions under this topic and its direct sub-topics
        #[arg(long)]
        search: Option<String>,
    },

    /// Assemble a question paper from a set's pattern
    Paper {
        /// Path to a question set file with a [pattern] table
        #[arg(long)]
        questions: PathBuf,

        /// Write the paper to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create starter config and example question set
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qeval=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            questions,
            undo,
            topic,
            format,
            save,
            output,
            config,
        } => commands::eval::execute(commands::eval::EvalArgs {
            questions,
            undo,
            topic,
            format,
            save,
            output,
            config,
        }),
        Commands::Compare {
            baseline,
            current,
            format,
        } => commands::compare::execute(baseline, current, format),
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Topics {
            questions,
            prefix,
            search,
        } => commands::topics::execute(questions, prefix, search),
        Commands::Paper { questions, output } => commands::paper::execute(questions, output),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
