//! Viva library crate (used by the server binary and integration tests).
//!
//! Grades technical interview answers, written or spoken, by fusing three text
//! signals into a 0–10 score with a verdict, plus optional delivery feedback
//! for recorded answers.
//!
//! # Public API Surface
//!
//! ## Evaluation
//! - [`Orchestrator`], [`EvaluationRequest`], [`EvaluationResult`] - Text evaluation
//! - [`SpokenAnswerPipeline`] - WAV upload to evaluation with delivery feedback
//! - [`fuse`], [`FusionWeights`], [`Verdict`] - Weighted score fusion
//! - [`analyze_delivery`], [`DeliveryConfidenceScorer`] - Delivery metrics and bonus
//!
//! ## Collaborators
//! - [`SemanticScorer`], [`ConceptScorer`], [`Retriever`] - Text signals
//! - [`AudioPreprocessor`], [`Transcriber`] - Spoken-answer front end
//! - [`SentenceEncoder`] - Shared sentence embeddings (model or stub)
//!
//! ## Data
//! - [`QuestionIndex`], [`Question`] - Validated question bank
//! - [`Passage`] - Evidence chunks
//!
//! ## Test/Mock Support
//! Scripted collaborators are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod audio;
pub mod config;
pub mod constants;
pub mod delivery;
pub mod embedding;
pub mod fusion;
pub mod gateway;
pub mod hashing;
pub mod orchestrator;
pub mod questions;
pub mod retrieval;
pub mod scoring;
pub mod transcription;

pub use audio::{AudioError, AudioPreprocessor, WavPreprocessor, is_wav};
pub use config::{Config, ConfigError};
pub use delivery::{AudioFeedback, DeliveryConfidenceScorer, DeliveryMetrics, analyze_delivery};
pub use embedding::{EmbeddingError, EncoderConfig, SentenceEncoder, cosine_similarity};
pub use fusion::{FusionResult, FusionWeights, ScoreMap, Verdict, fuse};
pub use orchestrator::{
    EvaluationError, EvaluationRequest, EvaluationResult, Orchestrator, ScoreBreakdown,
    SpokenAnswerPipeline, WeightPolicy,
};
pub use questions::{Question, QuestionError, QuestionIndex};
pub use retrieval::{DenseRetriever, Passage, RetrievalError, Retriever};
pub use scoring::{
    ConceptScorer, EmbeddingSemanticScorer, RegexConceptScorer, ScoringError, SemanticScorer,
};
pub use transcription::{
    ConfiguredTranscriber, HttpTranscriber, Transcriber, TranscriptionError,
    UnavailableTranscriber,
};

#[cfg(any(test, feature = "mock"))]
pub use audio::MockAudioPreprocessor;
#[cfg(any(test, feature = "mock"))]
pub use retrieval::MockRetriever;
#[cfg(any(test, feature = "mock"))]
pub use scoring::{MockConceptScorer, MockSemanticScorer};
#[cfg(any(test, feature = "mock"))]
pub use transcription::MockTranscriber;
