//! Sentence embeddings.
//!
//! [`SentenceEncoder`] turns text into unit vectors for [`crate::scoring`] and
//! [`crate::retrieval`].

/// Mean-pooled BERT encoder.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence encoder with model and stub backends.
pub mod encoder;
mod error;
/// Tokenizer loading helpers.
pub mod utils;

pub use encoder::{Embedding, EncoderConfig, SentenceEncoder, cosine_similarity};
pub use error::EmbeddingError;
