//! Canned transcriber.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::TranscriptionError;
use super::http::Transcriber;

#[derive(Debug, Clone)]
pub struct MockTranscriber {
    outcome: Result<String, String>,
    calls: Arc<AtomicUsize>,
}

impl MockTranscriber {
    pub fn with_text(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transcriber for MockTranscriber {
    async fn transcribe(&self, _signal: &[f32]) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
            .clone()
            .map_err(|reason| TranscriptionError::Failed { reason })
    }
}
