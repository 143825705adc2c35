//! Scripted scorers for orchestrator tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::concept::ConceptScorer;
use super::error::ScoringError;
use super::semantic::SemanticScorer;

#[derive(Debug, Clone)]
struct Script {
    outcome: Result<f64, String>,
    calls: Arc<AtomicUsize>,
}

impl Script {
    fn run(&self) -> Result<f64, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
            .clone()
            .map_err(|reason| ScoringError::ComputationFailed { reason })
    }
}

/// Semantic scorer that returns a fixed score or a fixed failure.
#[derive(Debug, Clone)]
pub struct MockSemanticScorer(Script);

impl MockSemanticScorer {
    pub fn fixed(score: f64) -> Self {
        Self(Script {
            outcome: Ok(score),
            calls: Arc::default(),
        })
    }

    pub fn failing(reason: &str) -> Self {
        Self(Script {
            outcome: Err(reason.to_string()),
            calls: Arc::default(),
        })
    }

    pub fn calls(&self) -> usize {
        self.0.calls.load(Ordering::SeqCst)
    }
}

impl SemanticScorer for MockSemanticScorer {
    async fn score(&self, _answer: &str, _reference: &str) -> Result<f64, ScoringError> {
        self.0.run()
    }
}

/// Concept scorer that returns a fixed score or a fixed failure.
#[derive(Debug, Clone)]
pub struct MockConceptScorer(Script);

impl MockConceptScorer {
    pub fn fixed(score: f64) -> Self {
        Self(Script {
            outcome: Ok(score),
            calls: Arc::default(),
        })
    }

    pub fn failing(reason: &str) -> Self {
        Self(Script {
            outcome: Err(reason.to_string()),
            calls: Arc::default(),
        })
    }

    pub fn calls(&self) -> usize {
        self.0.calls.load(Ordering::SeqCst)
    }
}

impl ConceptScorer for MockConceptScorer {
    async fn score(&self, _answer: &str, _concepts: &[String]) -> Result<f64, ScoringError> {
        self.0.run()
    }
}
