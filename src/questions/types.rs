use serde::{Deserialize, Serialize};

use crate::fusion::{FusionWeights, SIGNAL_EVIDENCE, SIGNAL_KEYWORD, SIGNAL_SEMANTIC};

/// A concept expected in a good answer.
///
/// `mandatory` is carried through but currently scored like any other concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyConcept {
    pub concept: String,
    pub mandatory: bool,
}

/// A reference answer with its key concepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealAnswer {
    #[serde(default)]
    pub answer_id: String,
    pub text: String,
    pub key_concepts: Vec<KeyConcept>,
    #[serde(default = "default_answer_weight")]
    pub weight: f64,
}

fn default_answer_weight() -> f64 {
    1.0
}

impl IdealAnswer {
    /// Concept strings in declaration order (mandatory and optional alike).
    pub fn concept_strings(&self) -> Vec<String> {
        self.key_concepts.iter().map(|kc| kc.concept.clone()).collect()
    }
}

/// A signal weight, written either as `{"weight": 0.55}` or as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalWeight {
    Bare(f64),
    Nested { weight: f64 },
}

impl SignalWeight {
    pub fn value(&self) -> f64 {
        match self {
            SignalWeight::Bare(w) | SignalWeight::Nested { weight: w } => *w,
        }
    }
}

/// Per-question fusion weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub semantic: SignalWeight,
    pub keyword: SignalWeight,
    pub evidence: SignalWeight,
}

impl EvaluationConfig {
    pub fn new(semantic: f64, keyword: f64, evidence: f64) -> Self {
        Self {
            semantic: SignalWeight::Bare(semantic),
            keyword: SignalWeight::Bare(keyword),
            evidence: SignalWeight::Bare(evidence),
        }
    }

    pub fn total(&self) -> f64 {
        self.semantic.value() + self.keyword.value() + self.evidence.value()
    }

    /// Weights keyed by fusion signal name.
    pub fn fusion_weights(&self) -> FusionWeights {
        FusionWeights::from([
            (SIGNAL_SEMANTIC.to_string(), self.semantic.value()),
            (SIGNAL_KEYWORD.to_string(), self.keyword.value()),
            (SIGNAL_EVIDENCE.to_string(), self.evidence.value()),
        ])
    }
}

/// An interview question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: String,
    pub topic: String,
    pub subtopic: String,
    pub difficulty: String,
    pub question_text: String,
    pub ideal_answers: Vec<IdealAnswer>,
    pub evaluation: EvaluationConfig,
    pub rag_references: serde_json::Value,
    pub metadata: serde_json::Value,
}

impl Question {
    /// The reference answer used for scoring: the first ideal answer.
    ///
    /// Non-empty `ideal_answers` is guaranteed by the loader.
    pub fn primary_answer(&self) -> Option<&IdealAnswer> {
        self.ideal_answers.first()
    }
}
