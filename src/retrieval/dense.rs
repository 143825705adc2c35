use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};

use super::error::RetrievalError;
use super::types::Passage;
use crate::embedding::{Embedding, SentenceEncoder, cosine_similarity};

/// Ranked evidence passages for a query.
pub trait Retriever: Send + Sync {
    fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> impl Future<Output = Result<Vec<Passage>, RetrievalError>> + Send;
}

struct Index {
    encoder: Arc<SentenceEncoder>,
    passages: Vec<Passage>,
    embeddings: Vec<Embedding>,
}

impl Index {
    fn search(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, RetrievalError> {
        let query = self.encoder.embed(query)?;

        let mut ranked: Vec<(usize, f32)> = self
            .embeddings
            .iter()
            .map(|e| cosine_similarity(&query, e))
            .enumerate()
            .collect();
        // Stable sort keeps corpus order among equal scores.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(top_k);

        debug!(
            top_score = ranked.first().map(|(_, s)| *s),
            hits = ranked.len(),
            "Dense retrieval"
        );

        Ok(ranked
            .into_iter()
            .map(|(idx, _)| self.passages[idx].clone())
            .collect())
    }
}

/// Exhaustive cosine search over pre-embedded corpus passages.
#[derive(Clone)]
pub struct DenseRetriever {
    index: Arc<Index>,
}

impl std::fmt::Debug for DenseRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DenseRetriever")
            .field("passages", &self.index.passages.len())
            .finish()
    }
}

impl DenseRetriever {
    /// Embeds every passage up front.
    pub fn build(
        encoder: Arc<SentenceEncoder>,
        passages: Vec<Passage>,
    ) -> Result<Self, RetrievalError> {
        let embeddings = passages
            .iter()
            .map(|p| encoder.embed(&p.text))
            .collect::<Result<Vec<_>, _>>()?;

        info!(passages = passages.len(), "Dense retrieval index built");

        Ok(Self {
            index: Arc::new(Index {
                encoder,
                passages,
                embeddings,
            }),
        })
    }

    pub fn len(&self) -> usize {
        self.index.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.passages.is_empty()
    }
}

impl Retriever for DenseRetriever {
    async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<Passage>, RetrievalError> {
        if query.trim().is_empty() || top_k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let index = Arc::clone(&self.index);
        let query = query.to_owned();
        tokio::task::spawn_blocking(move || index.search(&query, top_k))
            .await
            .map_err(|e| RetrievalError::TaskFailed {
                reason: e.to_string(),
            })?
    }
}
