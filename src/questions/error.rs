//! Load-time validation errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or indexing the question bank.
#[derive(Debug, Error)]
pub enum QuestionError {
    /// The question file could not be read.
    #[error("failed to read question file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON, or a record does not match the typed schema.
    #[error("invalid question JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level document is not an array of question records.
    #[error("question file must contain a JSON array of questions")]
    NotAnArray,

    #[error("question {question_id}: missing required field: {field}")]
    MissingField { question_id: String, field: String },

    #[error("question {question_id}: ideal_answers must be a non-empty list")]
    EmptyIdealAnswers { question_id: String },

    #[error("question {question_id}: invalid ideal_answer structure at index {index}: {reason}")]
    InvalidIdealAnswer {
        question_id: String,
        index: usize,
        reason: String,
    },

    #[error("question {question_id}: invalid key_concept structure in ideal answer {index}")]
    InvalidKeyConcept { question_id: String, index: usize },

    #[error("question {question_id}: invalid evaluation block: {reason}")]
    InvalidEvaluation { question_id: String, reason: String },

    /// Evaluation weights are outside the accepted tolerance around 1.0.
    #[error("question {question_id}: evaluation weights must sum to 1.0 (got {total:.4})")]
    WeightSum { question_id: String, total: f64 },

    #[error("duplicate question_id: {question_id}")]
    DuplicateId { question_id: String },
}
