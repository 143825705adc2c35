//! Fixed-signal preprocessor for pipeline tests.

use std::path::Path;

use super::error::AudioError;
use super::preprocessor::AudioPreprocessor;

#[derive(Debug, Clone, Default)]
pub struct MockAudioPreprocessor {
    signal: Vec<f32>,
}

impl MockAudioPreprocessor {
    /// Returns `signal` for every input; an empty signal yields `AudioError::Empty`.
    pub fn with_signal(signal: Vec<f32>) -> Self {
        Self { signal }
    }
}

impl AudioPreprocessor for MockAudioPreprocessor {
    fn preprocess_path(&self, _path: &Path) -> Result<Vec<f32>, AudioError> {
        self.preprocess_wav(&[])
    }

    fn preprocess_wav(&self, _bytes: &[u8]) -> Result<Vec<f32>, AudioError> {
        if self.signal.is_empty() {
            return Err(AudioError::Empty);
        }
        Ok(self.signal.clone())
    }
}
