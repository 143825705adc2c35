//! Canned retriever for orchestrator tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::dense::Retriever;
use super::error::RetrievalError;
use super::types::Passage;

#[derive(Debug, Clone, Default)]
pub struct MockRetriever {
    passages: Vec<Passage>,
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockRetriever {
    /// Returns up to `top_k` of `passages` for every query.
    pub fn with_passages(passages: Vec<Passage>) -> Self {
        Self {
            passages,
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Retriever for MockRetriever {
    async fn retrieve(&self, _query: &str, top_k: usize) -> Result<Vec<Passage>, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.failure {
            return Err(RetrievalError::Backend {
                reason: reason.clone(),
            });
        }
        Ok(self.passages.iter().take(top_k).cloned().collect())
    }
}
