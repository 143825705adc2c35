use std::path::Path;

use tracing::info;

use super::error::RetrievalError;
use super::types::Passage;

/// Reads a JSON array of corpus chunks.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<Passage>, RetrievalError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| RetrievalError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let passages: Vec<Passage> = serde_json::from_str(&raw)?;

    info!(path = %path.display(), passages = passages.len(), "Corpus loaded");
    Ok(passages)
}
