//! Speech-to-text collaborators.

pub mod error;
pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::TranscriptionError;
pub use http::{ConfiguredTranscriber, HttpTranscriber, Transcriber, UnavailableTranscriber};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTranscriber;
