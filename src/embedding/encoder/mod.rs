//! Sentence encoder behind the semantic scorer and the dense retriever.
//!
//! Use [`EncoderConfig::stub`] when no model directory is available.

/// Encoder configuration.
pub mod config;


pub use config::{EncoderConfig, REQUIRED_MODEL_FILES};

use std::sync::Arc;

use candle_core::{Device, Tensor};
use moka::sync::Cache;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::bert::BertSentenceModel;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_sentence_tokenizer;
use crate::hashing::{hash_text, hash_to_u64};

/// Unit-length embedding shared between the cache and callers.
pub type Embedding = Arc<[f32]>;

enum EncoderBackend {
    Model {
        model: BertSentenceModel,
        tokenizer: Arc<Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Text to unit-vector encoder with a BLAKE3-keyed memo cache.
pub struct SentenceEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
    cache: Cache<[u8; 32], Embedding>,
}

impl std::fmt::Debug for SentenceEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.embedding_dim())
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEncoder {
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;
        let cache = Cache::builder().max_capacity(config.cache_capacity).build();

        let Some(model_dir) = config.model_dir.clone() else {
            warn!("Sentence encoder running in STUB mode (hashed bag-of-words)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                config,
                cache,
            });
        };

        let device = select_device();
        let model = BertSentenceModel::load(&model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            }
        })?;
        let tokenizer = load_sentence_tokenizer(&model_dir, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            model_dir = %model_dir.display(),
            hidden_size = model.hidden_size(),
            max_seq_len = config.max_seq_len,
            "Sentence encoder loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
            cache,
        })
    }

    /// Stub encoder with default settings.
    pub fn stub() -> Self {
        let config = EncoderConfig::stub();
        Self {
            cache: Cache::builder().max_capacity(config.cache_capacity).build(),
            backend: EncoderBackend::Stub,
            config,
        }
    }

    /// Embeds `text`, serving repeats from the cache.
    pub fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let key = hash_text(text);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let vector = match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
            } => Self::embed_with_model(text, model, tokenizer, device)?,
            EncoderBackend::Stub => self.embed_stub(text),
        };

        let embedding: Embedding = normalize(vector).into();
        self.cache.insert(key, Arc::clone(&embedding));
        Ok(embedding)
    }

    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn embed_with_model(
        text: &str,
        model: &BertSentenceModel,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            "Encoding text"
        );

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let pooled = model.forward(&input_ids, &type_ids, &attention_mask)?;
        Ok(pooled.squeeze(0)?.to_vec1::<f32>()?)
    }

    /// Signed feature hashing of lowercase word tokens.
    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let dim = self.config.embedding_dim;
        let mut vector = vec![0.0f32; dim];

        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let h = hash_to_u64(token.as_bytes());
            let bucket = (h % dim as u64) as usize;
            let sign = if (h >> 63) == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        vector
    }

    pub fn embedding_dim(&self) -> usize {
        match &self.backend {
            EncoderBackend::Model { model, .. } => model.hidden_size(),
            EncoderBackend::Stub => self.config.embedding_dim,
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Entries currently held by the memo cache.
    pub fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

fn normalize(mut vector: Vec<f32>) -> Vec<f32> {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut vector {
            *x /= norm;
        }
    }
    vector
}

/// Cosine similarity in [-1, 1]; 0.0 for mismatched dimensions or zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0f32, 0.0f32, 0.0f32);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}
