use serde::Serialize;

use crate::delivery::AudioFeedback;
use crate::fusion::Verdict;
use crate::retrieval::Passage;

/// Inputs of one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationRequest<'a> {
    pub question_id: &'a str,
    pub student_answer: &'a str,
    /// Passages to request; the orchestrator default when `None`.
    pub top_k_evidence: Option<usize>,
    /// Normalized 16 kHz mono recording the answer was transcribed from.
    pub audio_signal: Option<&'a [f32]>,
}

impl<'a> EvaluationRequest<'a> {
    pub fn text(question_id: &'a str, student_answer: &'a str) -> Self {
        Self {
            question_id,
            student_answer,
            top_k_evidence: None,
            audio_signal: None,
        }
    }

    pub fn with_audio(mut self, signal: &'a [f32]) -> Self {
        self.audio_signal = Some(signal);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k_evidence = Some(top_k);
        self
    }
}

/// The three text signals that were fused.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub semantic: f64,
    pub keyword: f64,
    pub evidence: f64,
}

/// Unified evaluation output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub question_id: String,
    pub question: String,
    pub student_answer: String,
    pub final_score: f64,
    pub verdict: Verdict,
    pub score_breakdown: ScoreBreakdown,
    pub evidence_snippets: Vec<Passage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_feedback: Option<AudioFeedback>,
}
