//! The question store.
//!
//! Questions live in two collections: an insertion-ordered history used for
//! undo, and a max-heap on difficulty that answers every aggregate query.
//! Undo only pops the history, so the aggregates keep counting undone
//! questions.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::model::Question;
use crate::statistics::StoreStats;

/// Heap entry. Higher difficulty ranks first; among equal difficulties the
/// earlier insertion ranks first.
#[derive(Debug, Clone, Copy)]
struct Ranked {
    question: Question,
    seq: u64,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.question
            .difficulty
            .cmp(&other.question.difficulty)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Holds every added question and answers aggregate queries over them.
#[derive(Debug, Clone, Default)]
pub struct QuestionStore {
    queue: BinaryHeap<Ranked>,
    history: Vec<Question>,
    next_seq: u64,
}

impl QuestionStore {
    pub const fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            history: Vec::new(),
            next_seq: 0,
        }
    }

    /// Add a question to both the priority queue and the history.
    ///
    /// No range checks: any marks or difficulty is accepted.
    pub fn add_question(&mut self, marks: i32, difficulty: i32) {
        let question = Question::new(marks, difficulty);
        self.queue.push(Ranked {
            question,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        self.history.push(question);
        tracing::debug!(marks, difficulty, queued = self.queue.len(), "question added");
    }

    /// Sum of marks over the priority queue, or 0 when empty.
    ///
    /// Saturates at the `i32` bounds instead of wrapping.
    pub fn total_marks(&self) -> i32 {
        let total: i64 = self.queue.iter().map(|r| i64::from(r.question.marks)).sum();
        saturate(total)
    }

    /// Mean difficulty over the priority queue using truncating integer
    /// division, or 0 when empty.
    pub fn average_difficulty(&self) -> i32 {
        let count = self.queue.len() as i64;
        if count == 0 {
            return 0;
        }
        let total: i64 = self
            .queue
            .iter()
            .map(|r| i64::from(r.question.difficulty))
            .sum();
        saturate(total / count)
    }

    /// Marks of the highest-difficulty question, or 0 when empty.
    pub fn top_question_marks(&self) -> i32 {
        self.queue.peek().map_or(0, |r| r.question.marks)
    }

    /// The highest-difficulty question, if any.
    pub fn top_question(&self) -> Option<Question> {
        self.queue.peek().map(|r| r.question)
    }

    /// Pop the most recent question off the history.
    ///
    /// The priority queue is left untouched. Returns `None` on an empty
    /// history.
    pub fn undo_last_question(&mut self) -> Option<Question> {
        let undone = self.history.pop();
        match undone {
            Some(q) => tracing::debug!(
                marks = q.marks,
                difficulty = q.difficulty,
                remaining = self.history.len(),
                "undid last question"
            ),
            None => tracing::debug!("undo on empty history ignored"),
        }
        undone
    }

    /// Number of questions in the priority queue.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// History in insertion order.
    pub fn history(&self) -> impl Iterator<Item = &Question> {
        self.history.iter()
    }

    pub fn last_added(&self) -> Option<Question> {
        self.history.last().copied()
    }

    /// Questions in the priority queue, in no particular order.
    pub fn queued(&self) -> impl Iterator<Item = Question> + '_ {
        self.queue.iter().map(|r| r.question)
    }

    /// Snapshot of every aggregate.
    pub fn stats(&self) -> StoreStats {
        StoreStats::from_store(self)
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
