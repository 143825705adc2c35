use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("no transcription endpoint configured")]
    Unavailable,

    #[error("failed to encode audio for upload: {0}")]
    Encode(#[from] hound::Error),

    #[error("transcription request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transcription endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transcription failed: {reason}")]
    Failed { reason: String },
}
