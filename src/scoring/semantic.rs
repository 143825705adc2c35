use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use super::error::ScoringError;
use crate::embedding::{SentenceEncoder, cosine_similarity};

/// Similarity of an answer to a reference text, in [0, 1].
pub trait SemanticScorer: Send + Sync {
    fn score(
        &self,
        answer: &str,
        reference: &str,
    ) -> impl Future<Output = Result<f64, ScoringError>> + Send;
}

/// Cosine similarity of sentence embeddings, rescaled from [-1, 1] to [0, 1].
#[derive(Debug, Clone)]
pub struct EmbeddingSemanticScorer {
    encoder: Arc<SentenceEncoder>,
}

impl EmbeddingSemanticScorer {
    pub fn new(encoder: Arc<SentenceEncoder>) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &Arc<SentenceEncoder> {
        &self.encoder
    }

    /// Synchronous scoring; runs model inference on the calling thread.
    pub fn score_blocking(
        encoder: &SentenceEncoder,
        answer: &str,
        reference: &str,
    ) -> Result<f64, ScoringError> {
        if answer.trim().is_empty() || reference.trim().is_empty() {
            return Ok(0.0);
        }

        let a = encoder.embed(answer)?;
        let r = encoder.embed(reference)?;
        let cosine = f64::from(cosine_similarity(&a, &r));
        let score = ((cosine + 1.0) / 2.0).clamp(0.0, 1.0);

        debug!(cosine, score, "Semantic similarity");
        Ok(score)
    }
}

impl SemanticScorer for EmbeddingSemanticScorer {
    async fn score(&self, answer: &str, reference: &str) -> Result<f64, ScoringError> {
        let encoder = Arc::clone(&self.encoder);
        let answer = answer.to_owned();
        let reference = reference.to_owned();

        tokio::task::spawn_blocking(move || Self::score_blocking(&encoder, &answer, &reference))
            .await
            .map_err(|e| ScoringError::TaskFailed {
                reason: e.to_string(),
            })?
    }
}
