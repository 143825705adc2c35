use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to read audio file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid WAV data: {0}")]
    Wav(#[from] hound::Error),

    #[error("audio contains no samples")]
    Empty,

    #[error("unsupported WAV layout: {reason}")]
    Unsupported { reason: String },

    #[error("resampling failed: {reason}")]
    Resample { reason: String },
}
