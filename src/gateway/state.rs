use std::sync::Arc;

use crate::orchestrator::{Orchestrator, SpokenAnswerPipeline};

/// Shared handler state: the orchestrator plus the spoken-answer front end.
pub struct HandlerState<S, C, R, P, T> {
    pub orchestrator: Arc<Orchestrator<S, C, R>>,

    pub spoken: Arc<SpokenAnswerPipeline<P, T>>,

    /// `"stub"` or `"model"`, reported by `/ready`.
    pub encoder_mode: &'static str,

    pub max_audio_bytes: usize,
}

impl<S, C, R, P, T> Clone for HandlerState<S, C, R, P, T> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: Arc::clone(&self.orchestrator),
            spoken: Arc::clone(&self.spoken),
            encoder_mode: self.encoder_mode,
            max_audio_bytes: self.max_audio_bytes,
        }
    }
}

impl<S, C, R, P, T> HandlerState<S, C, R, P, T> {
    pub fn new(
        orchestrator: Orchestrator<S, C, R>,
        spoken: SpokenAnswerPipeline<P, T>,
        encoder_mode: &'static str,
        max_audio_bytes: usize,
    ) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            spoken: Arc::new(spoken),
            encoder_mode,
            max_audio_bytes,
        }
    }
}
