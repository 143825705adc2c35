use thiserror::Error;

use crate::audio::AudioError;
use crate::retrieval::RetrievalError;
use crate::scoring::ScoringError;
use crate::transcription::TranscriptionError;

/// Per-request evaluation failure. Evaluation is all-or-nothing.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("invalid question_id: {question_id}")]
    UnknownQuestion { question_id: String },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("could not transcribe audio")]
    EmptyTranscription,

    #[error("question {question_id} has no ideal answer")]
    NoIdealAnswer { question_id: String },

    #[error("semantic or concept scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("evidence retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("audio processing failed: {0}")]
    Audio(#[from] AudioError),

    #[error("transcription failed: {0}")]
    Transcription(#[from] TranscriptionError),

    #[error("evaluation task failed: {reason}")]
    Task { reason: String },
}

impl EvaluationError {
    /// `true` when the caller sent something unusable (maps to HTTP 400).
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            EvaluationError::UnknownQuestion { .. }
                | EvaluationError::InvalidInput { .. }
                | EvaluationError::EmptyTranscription
        )
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            EvaluationError::UnknownQuestion { .. } => "unknown_question",
            EvaluationError::InvalidInput { .. } => "invalid_input",
            EvaluationError::EmptyTranscription => "empty_transcription",
            EvaluationError::NoIdealAnswer { .. } => "no_ideal_answer",
            EvaluationError::Scoring(_) => "scoring_failed",
            EvaluationError::Retrieval(_) => "retrieval_failed",
            EvaluationError::Audio(_) => "audio_failed",
            EvaluationError::Transcription(_) => "transcription_failed",
            EvaluationError::Task { .. } => "task_failed",
        }
    }
}
