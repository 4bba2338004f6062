//! TOML question-set parser.
//!
//! Loads question sets from TOML files and directories, and validates them.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{
    Difficulty, PaperPattern, QuestionKind, QuestionRecord, QuestionSet, QuestionTypeSpec,
    Section,
};

/// Intermediate TOML structure for parsing question-set files.
#[derive(Debug, Deserialize)]
struct TomlQuestionFile {
    question_set: TomlQuestionSetHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
    #[serde(default)]
    pattern: Option<TomlPattern>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    subject: String,
    #[serde(default)]
    grade: Option<u8>,
    #[serde(default)]
    description: String,
    #[serde(default = "default_difficulty_str")]
    default_difficulty: String,
}

fn default_difficulty_str() -> String {
    "medium".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    text: String,
    topic: String,
    marks: i32,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    section: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlPattern {
    total_marks: i32,
    #[serde(default)]
    sections: Vec<TomlSection>,
}

#[derive(Debug, Deserialize)]
struct TomlSection {
    name: String,
    #[serde(default)]
    question_types: Vec<TomlQuestionType>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionType {
    #[serde(rename = "type")]
    kind: String,
    count: u32,
    marks_each: i32,
}

/// Parse a single TOML file into a `QuestionSet`.
pub fn parse_question_set(path: &Path) -> Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question set file: {}", path.display()))?;

    parse_question_set_str(&content, path)
}

/// Parse a TOML string into a `QuestionSet`.
pub fn parse_question_set_str(content: &str, source_path: &Path) -> Result<QuestionSet> {
    let parsed: TomlQuestionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let default_difficulty: Difficulty = parsed
        .question_set
        .default_difficulty
        .parse()
        .with_context(|| format!("invalid default_difficulty in {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let difficulty = match q.difficulty {
                Some(d) => d
                    .parse::<Difficulty>()
                    .with_context(|| format!("question '{}'", q.id))?,
                None => default_difficulty,
            };
            let kind = q
                .kind
                .map(|k| k.parse::<QuestionKind>())
                .transpose()
                .with_context(|| format!("question '{}'", q.id))?;

            Ok(QuestionRecord {
                id: q.id,
                text: q.text,
                topic: q.topic,
                marks: q.marks,
                difficulty,
                kind,
                section: q.section,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let pattern = parsed.pattern.map(convert_pattern).transpose()?;

    Ok(QuestionSet {
        id: parsed.question_set.id,
        name: parsed.question_set.name,
        subject: parsed.question_set.subject,
        grade: parsed.question_set.grade,
        description: parsed.question_set.description,
        questions,
        pattern,
    })
}

fn convert_pattern(pattern: TomlPattern) -> Result<PaperPattern> {
    let sections = pattern
        .sections
        .into_iter()
        .map(|s| {
            let question_types = s
                .question_types
                .into_iter()
                .map(|t| {
                    Ok(QuestionTypeSpec {
                        kind: t
                            .kind
                            .parse::<QuestionKind>()
                            .with_context(|| format!("pattern section '{}'", s.name))?,
                        count: t.count,
                        marks_each: t.marks_each,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Section {
                name: s.name,
                question_types,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PaperPattern {
        sections,
        total_marks: pattern.total_marks,
    })
}

/// Recursively load all `.toml` question-set files from a directory.
pub fn load_question_directory(dir: &Path) -> Result<Vec<QuestionSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            sets.extend(load_question_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_question_set(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a single file, or every set under a directory.
pub fn load_question_sets(path: &Path) -> Result<Vec<QuestionSet>> {
    if path.is_dir() {
        load_question_directory(path)
    } else {
        Ok(vec![parse_question_set(path)?])
    }
}

/// A warning from question-set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question set for common issues.
///
/// Warnings are advisory: the store accepts every question regardless.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in &set.questions {
        if !seen_ids.insert(&q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    let mut seen_content: HashMap<String, &str> = HashMap::new();
    for q in &set.questions {
        if let Some(first) = seen_content.insert(q.content_key(), &q.id) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("same topic and text as question {first}"),
            });
        }
    }

    for q in &set.questions {
        if q.marks <= 0 {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("marks should be positive, got {}", q.marks),
            });
        }
        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: "question text is empty".into(),
            });
        }
    }

    if let Some(pattern) = &set.pattern {
        let planned = pattern.planned_marks();
        if planned != i64::from(pattern.total_marks) {
            warnings.push(ValidationWarning {
                question_id: None,
                message: format!(
                    "pattern sections add up to {planned} marks but total_marks is {}",
                    pattern.total_marks
                ),
            });
        }

        for section in &pattern.sections {
            let has_questions = set
                .questions
                .iter()
                .any(|q| q.section.as_deref() == Some(section.name.as_str()));
            if !has_questions {
                warnings.push(ValidationWarning {
                    question_id: None,
                    message: format!("pattern section '{}' has no questions", section.name),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[question_set]
id = "physics-11"
name = "Physics Grade 11"
subject = "Physics"
grade = 11
description = "Mechanics and optics"

[[questions]]
id = "q1"
text = "State Newton's first law."
topic = "Mechanics"
marks = 2
difficulty = "easy"
type = "short"
section = "A"

[[questions]]
id = "q2"
text = "Derive the lens maker's formula."
topic = "Optics"
marks = 5
difficulty = "hard"
type = "long"
section = "B"

[pattern]
total_marks = 7

[[pattern.sections]]
name = "A"

[[pattern.sections.question_types]]
type = "short"
count = 1
marks_each = 2

[[pattern.sections]]
name = "B"

[[pattern.sections.question_types]]
type = "long"
count = 1
marks_each = 5
"#;

    #[test]
    fn parse_valid_toml() {
        let set = parse_question_set_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(set.id, "physics-11");
        assert_eq!(set.grade, Some(11));
        assert_eq!(set.questions.len(), 2);
        assert_eq!(set.questions[1].difficulty, Difficulty::Hard);
        assert_eq!(set.questions[1].kind, Some(QuestionKind::Long));
        let pattern = set.pattern.as_ref().unwrap();
        assert_eq!(pattern.sections.len(), 2);
        assert_eq!(pattern.total_marks, 7);
        assert!(validate_question_set(&set).is_empty());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[question_set]
id = "minimal"
name = "Minimal"

[[questions]]
id = "q1"
text = "Define work."
topic = "Energy"
marks = 1
"#;
        let set = parse_question_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(set.questions[0].difficulty, Difficulty::Medium);
        assert!(set.questions[0].kind.is_none());
        assert!(set.pattern.is_none());
        assert!(set.subject.is_empty());
    }

    #[test]
    fn default_difficulty_applies() {
        let toml = r#"
[question_set]
id = "hard-set"
name = "Hard"
default_difficulty = "hard"

[[questions]]
id = "q1"
text = "Prove it."
topic = "Proofs"
marks = 10
"#;
        let set = parse_question_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(set.questions[0].difficulty, Difficulty::Hard);
    }

    #[test]
    fn unknown_difficulty_is_an_error() {
        let toml = r#"
[question_set]
id = "bad"
name = "Bad"

[[questions]]
id = "q1"
text = "Something"
topic = "T"
marks = 1
difficulty = "impossible"
"#;
        let err = parse_question_set_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("unknown difficulty: impossible"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_question_set_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_duplicates() {
        let toml = r#"
[question_set]
id = "dupes"
name = "Dupes"

[[questions]]
id = "same"
text = "Define force."
topic = "Mechanics"
marks = 1

[[questions]]
id = "same"
text = "define FORCE."
topic = "mechanics"
marks = 1
"#;
        let set = parse_question_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_question_set(&set);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate question ID")));
        assert!(warnings.iter().any(|w| w.message.contains("same topic and text")));
    }

    #[test]
    fn validate_marks_and_text() {
        let toml = r#"
[question_set]
id = "odd"
name = "Odd"

[[questions]]
id = "q1"
text = "   "
topic = "T"
marks = 0
"#;
        let set = parse_question_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_question_set(&set);
        assert!(warnings.iter().any(|w| w.message.contains("marks should be positive")));
        assert!(warnings.iter().any(|w| w.message.contains("text is empty")));
    }

    #[test]
    fn validate_pattern_mismatch() {
        let toml = r#"
[question_set]
id = "pattern"
name = "Pattern"

[[questions]]
id = "q1"
text = "Explain."
topic = "T"
marks = 3
section = "A"

[pattern]
total_marks = 50

[[pattern.sections]]
name = "A"

[[pattern.sections.question_types]]
type = "mcq"
count = 10
marks_each = 1

[[pattern.sections]]
name = "B"
"#;
        let set = parse_question_set_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_question_set(&set);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("add up to 10 marks but total_marks is 50")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("section 'B' has no questions")));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("physics.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let sets = load_question_directory(dir.path()).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].id, "physics-11");
    }

    #[test]
    fn load_question_sets_accepts_file_or_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("physics.toml");
        std::fs::write(&file, VALID_TOML).unwrap();

        assert_eq!(load_question_sets(&file).unwrap().len(), 1);
        assert_eq!(load_question_sets(dir.path()).unwrap().len(), 1);
        assert!(load_question_sets(&dir.path().join("missing.toml")).is_err());
    }
}
