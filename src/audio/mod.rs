//! Recording ingestion for the spoken-answer path.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod preprocessor;


pub use error::AudioError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockAudioPreprocessor;
pub use preprocessor::{AudioPreprocessor, WavPreprocessor};

/// Returns `true` when `bytes` start with a RIFF/WAVE header.
pub fn is_wav(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
}
