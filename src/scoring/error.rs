use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("invalid concept pattern {concept:?}: {source}")]
    InvalidPattern {
        concept: String,
        #[source]
        source: regex::Error,
    },

    #[error("scoring task failed: {reason}")]
    TaskFailed { reason: String },

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },
}
