//! Core data model types for qeval.
//!
//! `Question` is the bare `(marks, difficulty)` pair the store works on.
//! The richer `QuestionRecord` and `QuestionSet` types describe questions as
//! they appear in question-set files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A single exam item as seen by the store.
///
/// Difficulty is nominally 1 (easy), 2 (medium) or 3 (hard), but any integer
/// is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub marks: i32,
    pub difficulty: i32,
}

impl Question {
    pub const fn new(marks: i32, difficulty: i32) -> Self {
        Self { marks, difficulty }
    }
}

/// Difficulty labels used in question-set files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Numeric score fed to the store.
    pub fn score(self) -> i32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "1" => Ok(Difficulty::Easy),
            "medium" | "2" => Ok(Difficulty::Medium),
            "hard" | "3" => Ok(Difficulty::Hard),
            other => Err(ModelError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Question format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Mcq,
    Short,
    Long,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Mcq => write!(f, "mcq"),
            QuestionKind::Short => write!(f, "short"),
            QuestionKind::Long => write!(f, "long"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mcq" => Ok(QuestionKind::Mcq),
            "short" => Ok(QuestionKind::Short),
            "long" => Ok(QuestionKind::Long),
            other => Err(ModelError::UnknownQuestionKind(other.to_string())),
        }
    }
}

/// A question as written in a question-set file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Unique identifier within its set.
    pub id: String,
    /// Question body.
    pub text: String,
    /// Topic name, e.g. "laws of motion".
    pub topic: String,
    pub marks: i32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub kind: Option<QuestionKind>,
    /// Paper section the question belongs to.
    #[serde(default)]
    pub section: Option<String>,
}

impl QuestionRecord {
    /// The store-level view of this record.
    pub fn to_question(&self) -> Question {
        Question::new(self.marks, self.difficulty.score())
    }

    /// Key used for duplicate detection: topic and text, case-insensitive.
    pub fn content_key(&self) -> String {
        format!("{}-{}", self.topic, self.text)
            .to_lowercase()
            .trim()
            .to_string()
    }
}

/// One row of a paper section: how many questions of a kind, at what marks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionTypeSpec {
    pub kind: QuestionKind,
    pub count: u32,
    pub marks_each: i32,
}

/// A named block of a question paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub question_types: Vec<QuestionTypeSpec>,
}

/// The intended shape of a question paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperPattern {
    #[serde(default)]
    pub sections: Vec<Section>,
    pub total_marks: i32,
}

impl PaperPattern {
    /// Marks implied by the section rows.
    pub fn planned_marks(&self) -> i64 {
        self.sections
            .iter()
            .flat_map(|s| &s.question_types)
            .map(|t| i64::from(t.count) * i64::from(t.marks_each))
            .sum()
    }
}

/// A collection of questions loaded from one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub grade: Option<u8>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    #[serde(default)]
    pub pattern: Option<PaperPattern>,
}

impl QuestionSet {
    /// Keep only the questions filed under `topic` (case-insensitive).
    pub fn retain_topic(&mut self, topic: &str) {
        let topic = topic.trim().to_lowercase();
        self.questions
            .retain(|q| q.topic.trim().to_lowercase() == topic);
    }
}
