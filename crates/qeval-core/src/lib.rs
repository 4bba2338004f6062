//! qeval-core: question store, statistics and question-set handling.
//!
//! The `QuestionStore` is the heart of the crate. The remaining modules load
//! questions from TOML files, assemble papers from a set's pattern, index
//! questions by topic, and persist statistics snapshots as JSON.

pub mod error;
pub mod model;
pub mod paper;
pub mod parser;
pub mod report;
pub mod statistics;
pub mod store;
pub mod topics;

pub use model::Question;
pub use store::QuestionStore;
