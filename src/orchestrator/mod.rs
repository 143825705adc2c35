//! Evaluation orchestration.
//!
//! [`Orchestrator`] resolves the question, fans out to the semantic scorer, the
//! concept scorer and the retriever, fuses the three text signals, and attaches
//! delivery feedback when a recording accompanies the answer.
//! [`SpokenAnswerPipeline`] turns a WAV upload into that recording plus its
//! transcript.

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;


pub use engine::{Orchestrator, WeightPolicy};
pub use error::EvaluationError;
pub use pipeline::{SpokenAnswer, SpokenAnswerPipeline};
pub use types::{EvaluationRequest, EvaluationResult, ScoreBreakdown};
