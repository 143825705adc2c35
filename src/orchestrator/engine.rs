use std::sync::Arc;

use tracing::{Span, debug, info, instrument};

use super::error::EvaluationError;
use super::types::{EvaluationRequest, EvaluationResult, ScoreBreakdown};
use crate::constants::{DEFAULT_TOP_K_EVIDENCE, MAX_EVIDENCE_SNIPPETS, MVP_EVIDENCE_SCORE};
use crate::delivery::{AudioFeedback, DeliveryConfidenceScorer, analyze_delivery};
use crate::fusion::{
    FusionResult, FusionWeights, SIGNAL_EVIDENCE, SIGNAL_KEYWORD, SIGNAL_SEMANTIC, ScoreMap, fuse,
};
use crate::questions::{Question, QuestionIndex};
use crate::retrieval::{Passage, Retriever};
use crate::scoring::{ConceptScorer, SemanticScorer};

/// Where fusion weights come from.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WeightPolicy {
    /// Each question's own `evaluation` weights.
    #[default]
    PerQuestion,
    /// One weight set for every question.
    Fixed(FusionWeights),
}

impl WeightPolicy {
    pub fn weights_for(&self, question: &Question) -> FusionWeights {
        match self {
            WeightPolicy::PerQuestion => question.evaluation.fusion_weights(),
            WeightPolicy::Fixed(weights) => weights.clone(),
        }
    }
}

/// Text-path outcome, computed before any audio is looked at.
struct TextVerdict {
    fusion: FusionResult,
    breakdown: ScoreBreakdown,
    evidence: Vec<Passage>,
}

/// Sequences the scoring collaborators, fusion and delivery feedback.
///
/// Generic over its collaborators so deployments and tests pick implementations
/// at construction time. The question index is shared read-only.
pub struct Orchestrator<S, C, R> {
    questions: Arc<QuestionIndex>,
    semantic: S,
    concept: C,
    retriever: R,
    weights: WeightPolicy,
    delivery: DeliveryConfidenceScorer,
    top_k_evidence: usize,
}

impl<S, C, R> std::fmt::Debug for Orchestrator<S, C, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("questions", &self.questions.len())
            .field("weights", &self.weights)
            .field("delivery", &self.delivery)
            .field("top_k_evidence", &self.top_k_evidence)
            .finish()
    }
}

impl<S, C, R> Orchestrator<S, C, R>
where
    S: SemanticScorer,
    C: ConceptScorer,
    R: Retriever,
{
    pub fn new(questions: Arc<QuestionIndex>, semantic: S, concept: C, retriever: R) -> Self {
        Self {
            questions,
            semantic,
            concept,
            retriever,
            weights: WeightPolicy::default(),
            delivery: DeliveryConfidenceScorer::default(),
            top_k_evidence: DEFAULT_TOP_K_EVIDENCE,
        }
    }

    pub fn with_weight_policy(mut self, weights: WeightPolicy) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_delivery_scorer(mut self, delivery: DeliveryConfidenceScorer) -> Self {
        self.delivery = delivery;
        self
    }

    pub fn with_top_k_evidence(mut self, top_k: usize) -> Self {
        self.top_k_evidence = top_k;
        self
    }

    pub fn questions(&self) -> &QuestionIndex {
        &self.questions
    }

    pub fn weight_policy(&self) -> &WeightPolicy {
        &self.weights
    }

    /// Looks up a question, failing with [`EvaluationError::UnknownQuestion`].
    pub fn question(&self, question_id: &str) -> Result<Arc<Question>, EvaluationError> {
        self.questions
            .get(question_id)
            .ok_or_else(|| EvaluationError::UnknownQuestion {
                question_id: question_id.to_string(),
            })
    }

    /// Scores an answer and, when audio is supplied, attaches delivery feedback.
    ///
    /// The question is resolved before any collaborator is called. Audio never
    /// changes `final_score` or `verdict`.
    #[instrument(
        skip(self, request),
        fields(question_id = request.question_id, verdict = tracing::field::Empty)
    )]
    pub async fn evaluate(
        &self,
        request: EvaluationRequest<'_>,
    ) -> Result<EvaluationResult, EvaluationError> {
        let question = self.question(request.question_id)?;
        let top_k = request.top_k_evidence.unwrap_or(self.top_k_evidence);

        let text = self
            .score_text(&question, request.student_answer, top_k)
            .await?;
        Span::current().record("verdict", text.fusion.verdict.as_str());

        let audio_feedback = match request.audio_signal {
            Some(signal) => Some(
                self.delivery_feedback(signal, request.student_answer)
                    .await?,
            ),
            None => None,
        };

        info!(
            final_score = text.fusion.final_score,
            evidence = text.evidence.len(),
            audio = audio_feedback.is_some(),
            "Evaluation complete"
        );

        Ok(EvaluationResult {
            question_id: question.question_id.clone(),
            question: question.question_text.clone(),
            student_answer: request.student_answer.to_string(),
            final_score: text.fusion.final_score,
            verdict: text.fusion.verdict,
            score_breakdown: text.breakdown,
            evidence_snippets: text.evidence,
            audio_feedback,
        })
    }

    async fn score_text(
        &self,
        question: &Question,
        answer: &str,
        top_k: usize,
    ) -> Result<TextVerdict, EvaluationError> {
        let ideal = question
            .primary_answer()
            .ok_or_else(|| EvaluationError::NoIdealAnswer {
                question_id: question.question_id.clone(),
            })?;
        let concepts = ideal.concept_strings();
        let query = format!("{} {}", question.question_text, answer);

        let (semantic, keyword, mut passages) = tokio::try_join!(
            async {
                self.semantic
                    .score(answer, &ideal.text)
                    .await
                    .map_err(EvaluationError::from)
            },
            async {
                self.concept
                    .score(answer, &concepts)
                    .await
                    .map_err(EvaluationError::from)
            },
            async {
                self.retriever
                    .retrieve(&query, top_k)
                    .await
                    .map_err(EvaluationError::from)
            },
        )?;

        let evidence = if passages.is_empty() {
            0.0
        } else {
            MVP_EVIDENCE_SCORE
        };
        debug!(semantic, keyword, evidence, passages = passages.len(), "Text signals");

        let scores = ScoreMap::from([
            (SIGNAL_SEMANTIC.to_string(), semantic),
            (SIGNAL_KEYWORD.to_string(), keyword),
            (SIGNAL_EVIDENCE.to_string(), evidence),
        ]);
        let fusion = fuse(&scores, &self.weights.weights_for(question));

        passages.truncate(MAX_EVIDENCE_SNIPPETS);
        Ok(TextVerdict {
            fusion,
            breakdown: ScoreBreakdown {
                semantic,
                keyword,
                evidence,
            },
            evidence: passages,
        })
    }

    /// Frame analysis runs on the blocking pool; it scans the whole recording twice.
    async fn delivery_feedback(
        &self,
        signal: &[f32],
        transcript: &str,
    ) -> Result<AudioFeedback, EvaluationError> {
        let signal = signal.to_vec();
        let transcript = transcript.to_string();
        let scorer = self.delivery;

        tokio::task::spawn_blocking(move || {
            let metrics = analyze_delivery(&signal, &transcript);
            scorer.score(&metrics)
        })
        .await
        .map_err(|e| EvaluationError::Task {
            reason: e.to_string(),
        })
    }
}
