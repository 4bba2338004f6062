//! The `qeval compare` command.

use std::path::PathBuf;

use anyhow::Result;

use qeval_core::report::StatsReport;

pub fn execute(baseline_path: PathBuf, current_path: PathBuf, format: String) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json" | "markdown" | "md"),
        "unknown format '{format}', expected text, json or markdown"
    );

    let baseline = StatsReport::load_json(&baseline_path)?;
    let current = StatsReport::load_json(&current_path)?;

    let comparison = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", comparison.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
        _ => {
            // text
            let changed = comparison.changed().count();
            println!(
                "Comparison: {changed} changed, {} unchanged",
                comparison.metrics.len() - changed
            );

            for m in comparison.changed() {
                println!(
                    "  {}: {} -> {} ({:+})",
                    m.metric, m.baseline, m.current, m.delta
                );
            }
        }
    }

    Ok(())
}
