//! Question paper assembly.
//!
//! A paper is built from a set's `[pattern]`: every section row asks for
//! `count` questions of one kind, each worth `marks_each`. Rows are filled in
//! file order from questions not already placed. For a row, candidates are
//! ranked: same kind filed under the section, then same kind with no section,
//! then untyped questions filed under the section or with no section.

use std::collections::HashSet;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::{Difficulty, QuestionKind, QuestionRecord, QuestionSet};
use crate::statistics::StoreStats;
use crate::store::QuestionStore;

/// An assembled question paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    pub set_id: String,
    /// Subject, or the set name when the set has none.
    pub title: String,
    pub grade: Option<u8>,
    /// Total marks declared by the pattern.
    pub total_marks: i32,
    pub sections: Vec<PaperSection>,
    /// Rows that could not be filled completely.
    #[serde(default)]
    pub shortfalls: Vec<Shortfall>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperSection {
    pub name: String,
    pub questions: Vec<PaperQuestion>,
}

/// A question placed on the paper, carrying the marks its row awards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperQuestion {
    pub id: String,
    pub text: String,
    pub topic: String,
    pub marks: i32,
    pub difficulty: Difficulty,
    pub kind: QuestionKind,
}

/// A pattern row that asked for more questions than the set could supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub section: String,
    pub kind: QuestionKind,
    pub wanted: u32,
    pub found: u32,
}

fn rank(q: &QuestionRecord, section: &str, kind: QuestionKind) -> Option<u8> {
    let in_section = q.section.as_deref() == Some(section);
    let unfiled = q.section.is_none();
    match q.kind {
        Some(k) if k == kind && in_section => Some(0),
        Some(k) if k == kind && unfiled => Some(1),
        None if in_section || unfiled => Some(2),
        _ => None,
    }
}

/// Select questions for every row of the set's pattern.
pub fn assemble_paper(set: &QuestionSet) -> Result<Paper, ModelError> {
    let pattern = set
        .pattern
        .as_ref()
        .ok_or_else(|| ModelError::MissingPattern(set.id.clone()))?;

    let mut used: HashSet<usize> = HashSet::new();
    let mut sections = Vec::with_capacity(pattern.sections.len());
    let mut shortfalls = Vec::new();

    for section in &pattern.sections {
        let mut questions = Vec::new();

        for row in &section.question_types {
            let mut candidates: Vec<(u8, usize)> = set
                .questions
                .iter()
                .enumerate()
                .filter(|(i, _)| !used.contains(i))
                .filter_map(|(i, q)| rank(q, &section.name, row.kind).map(|r| (r, i)))
                .collect();
            candidates.sort_unstable();

            let picked: Vec<usize> = candidates
                .into_iter()
                .take(row.count as usize)
                .map(|(_, i)| i)
                .collect();

            if picked.len() < row.count as usize {
                tracing::warn!(
                    section = %section.name,
                    kind = %row.kind,
                    wanted = row.count,
                    found = picked.len(),
                    "not enough questions for pattern row"
                );
                shortfalls.push(Shortfall {
                    section: section.name.clone(),
                    kind: row.kind,
                    wanted: row.count,
                    found: picked.len() as u32,
                });
            }

            for i in picked {
                used.insert(i);
                let q = &set.questions[i];
                questions.push(PaperQuestion {
                    id: q.id.clone(),
                    text: q.text.clone(),
                    topic: q.topic.clone(),
                    marks: row.marks_each,
                    difficulty: q.difficulty,
                    kind: row.kind,
                });
            }
        }

        sections.push(PaperSection {
            name: section.name.clone(),
            questions,
        });
    }

    let title = if set.subject.trim().is_empty() {
        set.name.clone()
    } else {
        set.subject.clone()
    };

    Ok(Paper {
        set_id: set.id.clone(),
        title,
        grade: set.grade,
        total_marks: pattern.total_marks,
        sections,
        shortfalls,
    })
}

impl Paper {
    /// Placed questions in paper order.
    pub fn questions(&self) -> impl Iterator<Item = &PaperQuestion> {
        self.sections.iter().flat_map(|s| &s.questions)
    }

    pub fn question_count(&self) -> usize {
        self.questions().count()
    }

    /// A store holding every placed question, in paper order.
    pub fn store(&self) -> QuestionStore {
        let mut store = QuestionStore::new();
        for q in self.questions() {
            store.add_question(q.marks, q.difficulty.score());
        }
        store
    }

    pub fn stats(&self) -> StoreStats {
        self.store().stats()
    }

    /// Plain-text rendering with continuous question numbering.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} Question Paper", self.title);
        if let Some(grade) = self.grade {
            let _ = writeln!(out, "Grade: {grade}");
        }
        let _ = writeln!(out, "Total Marks: {}", self.total_marks);

        let mut number = 0;
        for section in &self.sections {
            let _ = write!(out, "\nSection {}\n", section.name);
            for q in &section.questions {
                number += 1;
                let _ = write!(
                    out,
                    "\nQ{number}. [{} marks]\n{}\nTopic: {}\n",
                    q.marks, q.text, q.topic
                );
            }
        }

        out
    }
}
