//! Stats report types with JSON persistence and comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::QuestionSet;
use crate::statistics::StoreStats;

/// A saved snapshot of one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The sets whose questions were fed into the store.
    pub question_sets: Vec<QuestionSetSummary>,
    /// Aggregates at the end of the run.
    pub stats: StoreStats,
    /// Number of undo calls applied after loading.
    #[serde(default)]
    pub undone: usize,
}

/// Summary of a question set (without the questions themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSetSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl From<&QuestionSet> for QuestionSetSummary {
    fn from(set: &QuestionSet) -> Self {
        Self {
            id: set.id.clone(),
            name: set.name.clone(),
            question_count: set.questions.len(),
        }
    }
}

impl StatsReport {
    pub fn new(question_sets: &[QuestionSet], stats: StoreStats, undone: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            question_sets: question_sets.iter().map(QuestionSetSummary::from).collect(),
            stats,
            undone,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: StatsReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this report against a baseline.
    pub fn compare(&self, baseline: &StatsReport) -> StatsComparison {
        let metric = |name: &str, base: i64, current: i64| MetricDelta {
            metric: name.to_string(),
            baseline: base,
            current,
            delta: current - base,
        };

        let b = &baseline.stats;
        let c = &self.stats;
        StatsComparison {
            metrics: vec![
                metric(
                    "question_count",
                    b.question_count as i64,
                    c.question_count as i64,
                ),
                metric(
                    "total_marks",
                    i64::from(b.total_marks),
                    i64::from(c.total_marks),
                ),
                metric(
                    "average_difficulty",
                    i64::from(b.average_difficulty),
                    i64::from(c.average_difficulty),
                ),
                metric(
                    "top_question_marks",
                    i64::from(b.top_question_marks),
                    i64::from(c.top_question_marks),
                ),
            ],
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsComparison {
    pub metrics: Vec<MetricDelta>,
}

/// Change in one aggregate between two reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub metric: String,
    pub baseline: i64,
    pub current: i64,
    pub delta: i64,
}

impl StatsComparison {
    /// Metrics whose value moved.
    pub fn changed(&self) -> impl Iterator<Item = &MetricDelta> {
        self.metrics.iter().filter(|m| m.delta != 0)
    }

    pub fn has_changes(&self) -> bool {
        self.changed().next().is_some()
    }

    pub fn get(&self, metric: &str) -> Option<&MetricDelta> {
        self.metrics.iter().find(|m| m.metric == metric)
    }

    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let changed = self.changed().count();
        let mut md = format!(
            "**Summary:** {changed} changed, {} unchanged\n\n",
            self.metrics.len() - changed
        );

        md.push_str("| Metric | Baseline | Current | Delta |\n");
        md.push_str("|--------|----------|---------|-------|\n");
        for m in &self.metrics {
            md.push_str(&format!(
                "| {} | {} | {} | {:+} |\n",
                m.metric, m.baseline, m.current, m.delta
            ));
        }

        md
    }
}
