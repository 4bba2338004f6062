//! Model error types.
//!
//! The question store itself never fails; these errors cover the typed
//! labels that appear in question-set files.

use thiserror::Error;

/// Errors raised while interpreting question-set labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The difficulty label is not one of easy, medium or hard.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// The question kind is not one of mcq, short or long.
    #[error("unknown question kind: {0}")]
    UnknownQuestionKind(String),

    /// A paper was requested from a set that has no `[pattern]`.
    #[error("question set '{0}' has no paper pattern")]
    MissingPattern(String),
}

impl ModelError {
    /// The offending label (or set id) as written in the source file.
    pub fn label(&self) -> &str {
        match self {
            ModelError::UnknownDifficulty(label)
            | ModelError::UnknownQuestionKind(label)
            | ModelError::MissingPattern(label) => label,
        }
    }
}
