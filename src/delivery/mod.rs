//! Audio delivery diagnostics.
//!
//! [`analyze_delivery`] derives coarse, non-punitive metrics from a normalised mono
//! 16 kHz signal and its transcript; [`DeliveryConfidenceScorer`] turns them into
//! feedback text and a positive-only bonus suggestion.
//!
//! Nothing in this module feeds the fused answer score. Results are attached to an
//! evaluation after its verdict has been computed.

pub mod confidence;
pub mod metrics;
pub mod signal;
pub mod types;

#[cfg(test)]
mod tests;

pub use confidence::{DeliveryConfidenceScorer, DeliveryRemark};
pub use metrics::{
    analyze_delivery, compute_pause_score, compute_rms_stability, compute_speaking_rate_score,
    pause_score_from_ratio, rms_stability_from_cv, speaking_rate_score_from_rate,
};
pub use signal::{SpeechInterval, frame_rms, non_silent_frames, split_speech, trim_silence};
pub use types::{AudioFeedback, DeliveryMetrics};
