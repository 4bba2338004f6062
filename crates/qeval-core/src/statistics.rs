//! Aggregate statistics over a question store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::QuestionStore;

/// Point-in-time aggregates of a `QuestionStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Questions in the priority queue.
    pub question_count: usize,
    /// Questions still in the undo history.
    pub history_len: usize,
    pub total_marks: i32,
    /// Truncated mean difficulty.
    pub average_difficulty: i32,
    /// Marks of the hardest question.
    pub top_question_marks: i32,
    /// Per-difficulty counts and marks.
    #[serde(default)]
    pub by_difficulty: BTreeMap<i32, DifficultyBucket>,
}

/// Questions sharing one difficulty value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyBucket {
    pub count: usize,
    pub marks: i64,
}

impl StoreStats {
    pub fn from_store(store: &QuestionStore) -> Self {
        let mut by_difficulty: BTreeMap<i32, DifficultyBucket> = BTreeMap::new();
        for q in store.queued() {
            let bucket = by_difficulty.entry(q.difficulty).or_default();
            bucket.count += 1;
            bucket.marks += i64::from(q.marks);
        }

        Self {
            question_count: store.len(),
            history_len: store.history_len(),
            total_marks: store.total_marks(),
            average_difficulty: store.average_difficulty(),
            top_question_marks: store.top_question_marks(),
            by_difficulty,
        }
    }

    /// Questions that were undone but still count toward the aggregates.
    pub fn stale_count(&self) -> usize {
        self.question_count.saturating_sub(self.history_len)
    }
}
