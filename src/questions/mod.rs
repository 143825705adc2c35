//! Question bank: typed records, validating loader and the read-only index.
//!
//! The bank is loaded once at startup. Any validation failure is fatal; the process
//! must not serve evaluations from a partially valid question set.

pub mod error;
pub mod index;
pub mod loader;
pub mod types;


pub use error::QuestionError;
pub use index::QuestionIndex;
pub use loader::{QuestionLoader, validate_question};
pub use types::{EvaluationConfig, IdealAnswer, KeyConcept, Question, SignalWeight};
