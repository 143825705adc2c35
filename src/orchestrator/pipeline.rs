use std::sync::Arc;

use tracing::{debug, instrument};

use super::engine::Orchestrator;
use super::error::EvaluationError;
use super::types::{EvaluationRequest, EvaluationResult};
use crate::audio::AudioPreprocessor;
use crate::retrieval::Retriever;
use crate::scoring::{ConceptScorer, SemanticScorer};
use crate::transcription::Transcriber;

/// A recording after preprocessing and transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct SpokenAnswer {
    pub transcript: String,
    pub signal: Vec<f32>,
}

/// WAV upload → normalized signal → transcript → evaluation with delivery feedback.
pub struct SpokenAnswerPipeline<P, T> {
    preprocessor: Arc<P>,
    transcriber: T,
}

impl<P, T> SpokenAnswerPipeline<P, T>
where
    P: AudioPreprocessor + 'static,
    T: Transcriber,
{
    pub fn new(preprocessor: P, transcriber: T) -> Self {
        Self {
            preprocessor: Arc::new(preprocessor),
            transcriber,
        }
    }

    pub fn transcriber(&self) -> &T {
        &self.transcriber
    }

    /// Preprocesses on the blocking pool, then transcribes.
    ///
    /// An empty transcript is [`EvaluationError::EmptyTranscription`].
    pub async fn transcribe_wav(&self, wav: Vec<u8>) -> Result<SpokenAnswer, EvaluationError> {
        let preprocessor = Arc::clone(&self.preprocessor);
        let signal = tokio::task::spawn_blocking(move || preprocessor.preprocess_wav(&wav))
            .await
            .map_err(|e| EvaluationError::Task {
                reason: e.to_string(),
            })??;

        let transcript = self.transcriber.transcribe(&signal).await?;
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(EvaluationError::EmptyTranscription);
        }

        debug!(
            samples = signal.len(),
            words = transcript.split_whitespace().count(),
            "Spoken answer transcribed"
        );
        Ok(SpokenAnswer {
            transcript: transcript.to_string(),
            signal,
        })
    }

    /// Evaluates a spoken answer; unknown questions fail before any audio work.
    #[instrument(skip(self, orchestrator, wav), fields(wav_bytes = wav.len()))]
    pub async fn evaluate<S, C, R>(
        &self,
        orchestrator: &Orchestrator<S, C, R>,
        question_id: &str,
        wav: Vec<u8>,
        top_k_evidence: Option<usize>,
    ) -> Result<EvaluationResult, EvaluationError>
    where
        S: SemanticScorer,
        C: ConceptScorer,
        R: Retriever,
    {
        orchestrator.question(question_id)?;

        let spoken = self.transcribe_wav(wav).await?;
        let mut request =
            EvaluationRequest::text(question_id, &spoken.transcript).with_audio(&spoken.signal);
        request.top_k_evidence = top_k_evidence;

        orchestrator.evaluate(request).await
    }
}
