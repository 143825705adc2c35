use std::path::PathBuf;

use crate::constants::{DEFAULT_EMBEDDING_CACHE_CAPACITY, DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};
use crate::embedding::error::EmbeddingError;

/// Files a sentence-transformer directory must contain.
pub const REQUIRED_MODEL_FILES: [&str; 3] = ["config.json", "model.safetensors", "tokenizer.json"];

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEncoder`](super::SentenceEncoder).
pub struct EncoderConfig {
    /// Sentence-transformer directory; `None` selects the hashed bag-of-words stub.
    pub model_dir: Option<PathBuf>,
    /// Max tokens per text.
    pub max_seq_len: usize,
    /// Output dimension of the stub backend (the model reports its own).
    pub embedding_dim: usize,
    /// Memoised embeddings.
    pub cache_capacity: u64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            embedding_dim: DEFAULT_EMBEDDING_DIM,
            cache_capacity: DEFAULT_EMBEDDING_CACHE_CAPACITY,
        }
    }
}

impl EncoderConfig {
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn is_stub(&self) -> bool {
        self.model_dir.is_none()
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be greater than zero".to_string(),
            });
        }

        let Some(dir) = &self.model_dir else {
            return Ok(());
        };
        if !dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound { path: dir.clone() });
        }
        for file in REQUIRED_MODEL_FILES {
            if !dir.join(file).exists() {
                return Err(EmbeddingError::ModelLoadFailed {
                    reason: format!("Missing {} in {}", file, dir.display()),
                });
            }
        }
        Ok(())
    }
}
