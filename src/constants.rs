//! Cross-cutting, shared constants.
//!
//! Secondary values (frame sizes in samples) are derived from the primary ones
//! (sample rate, window durations) so they cannot drift apart.

/// Sample rate every audio signal is normalised to before analysis.
pub const SAMPLE_RATE: u32 = 16_000;

/// RMS analysis window length (25 ms).
pub const RMS_FRAME_MS: u32 = 25;
/// RMS analysis hop length (10 ms).
pub const RMS_HOP_MS: u32 = 10;

/// RMS analysis window in samples (400 at 16 kHz).
pub const RMS_FRAME_LENGTH: usize = (SAMPLE_RATE * RMS_FRAME_MS / 1000) as usize;
/// RMS analysis hop in samples (160 at 16 kHz).
pub const RMS_HOP_LENGTH: usize = (SAMPLE_RATE * RMS_HOP_MS / 1000) as usize;

/// Frame length used by the silence splitter and trimmer.
pub const SPLIT_FRAME_LENGTH: usize = 2048;
/// Hop length used by the silence splitter and trimmer.
pub const SPLIT_HOP_LENGTH: usize = 512;

/// Frames quieter than this many dB below the loudest frame count as silence.
pub const SILENCE_TOP_DB: f64 = 20.0;

/// Power floor applied before the dB conversion.
pub const POWER_FLOOR: f64 = 1e-10;

/// Allowed deviation of an evaluation weight set from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Passages requested from the retriever when the caller does not say otherwise.
pub const DEFAULT_TOP_K_EVIDENCE: usize = 5;

/// Evidence passages echoed back in an evaluation result.
pub const MAX_EVIDENCE_SNIPPETS: usize = 3;

/// Flat evidence score awarded when the retriever returns anything.
pub const MVP_EVIDENCE_SCORE: f64 = 0.5;

/// Delivery stability needed before a bonus is suggested.
pub const DEFAULT_BONUS_THRESHOLD: f64 = 0.62;

/// Upper bound of the suggested delivery bonus.
pub const DEFAULT_MAX_BONUS: f64 = 0.30;

/// Output dimension of the default sentence encoder (MiniLM-L6).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token budget per encoded text.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Memoised embeddings kept by the encoder.
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 4_096;

/// Shortest written answer accepted over HTTP.
pub const MIN_TEXT_ANSWER_LEN: usize = 5;

/// Default upper bound for uploaded audio bodies (25 MiB).
pub const DEFAULT_MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;
