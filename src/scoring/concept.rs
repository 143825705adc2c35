use std::future::Future;

use regex::Regex;
use tracing::debug;

use super::error::ScoringError;

/// Fraction of key concepts an answer mentions, in [0, 1].
pub trait ConceptScorer: Send + Sync {
    fn score(
        &self,
        answer: &str,
        concepts: &[String],
    ) -> impl Future<Output = Result<f64, ScoringError>> + Send;
}

/// Whole-word, case-insensitive concept matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexConceptScorer;

impl RegexConceptScorer {
    pub fn new() -> Self {
        Self
    }

    /// Matched concepts divided by total concepts; 0.0 when either side is empty.
    pub fn coverage(answer: &str, concepts: &[String]) -> Result<f64, ScoringError> {
        if answer.is_empty() || concepts.is_empty() {
            return Ok(0.0);
        }

        let haystack = answer.to_lowercase();
        let mut matched = 0usize;
        for concept in concepts {
            let pattern = format!(r"\b{}\b", regex::escape(&concept.to_lowercase()));
            let re = Regex::new(&pattern).map_err(|source| ScoringError::InvalidPattern {
                concept: concept.clone(),
                source,
            })?;
            if re.is_match(&haystack) {
                matched += 1;
            }
        }

        debug!(matched, total = concepts.len(), "Concept coverage");
        Ok(matched as f64 / concepts.len() as f64)
    }
}

impl ConceptScorer for RegexConceptScorer {
    async fn score(&self, answer: &str, concepts: &[String]) -> Result<f64, ScoringError> {
        Self::coverage(answer, concepts)
    }
}
