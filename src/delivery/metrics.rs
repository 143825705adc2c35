use tracing::debug;

use crate::constants::{
    RMS_FRAME_LENGTH, RMS_HOP_LENGTH, SAMPLE_RATE, SILENCE_TOP_DB, SPLIT_FRAME_LENGTH,
    SPLIT_HOP_LENGTH,
};
use crate::fusion::round_to;

use super::signal::{SpeechInterval, frame_rms, split_speech};
use super::types::DeliveryMetrics;

const RMS_WEIGHT: f64 = 0.6;
const PAUSE_WEIGHT: f64 = 0.4;

/// Buckets an RMS coefficient of variation (strict upper bounds).
pub fn rms_stability_from_cv(cv: f64) -> f64 {
    if cv < 0.30 {
        1.0
    } else if cv < 0.55 {
        0.7
    } else {
        0.4
    }
}

/// Buckets a pause ratio (inclusive upper bounds).
pub fn pause_score_from_ratio(pause_ratio: f64) -> f64 {
    if pause_ratio <= 0.35 {
        1.0
    } else if pause_ratio <= 0.50 {
        0.7
    } else {
        0.4
    }
}

/// Buckets a speaking rate in words per second.
///
/// The second arm's `rate < 1.2` test can never be the deciding clause: any rate below
/// 1.2 also satisfies `rate <= 3.5`. Rates in `(3.0, 3.5]` therefore score 0.7 exactly like
/// slow speech. Kept as observed in production scoring.
#[allow(clippy::nonminimal_bool)]
pub fn speaking_rate_score_from_rate(rate: f64) -> f64 {
    if (1.2..=3.0).contains(&rate) {
        1.0
    } else if rate < 1.2 || rate <= 3.5 {
        0.7
    } else {
        0.4
    }
}

/// Energy stability of the whole signal; 0.0 when there is no energy to measure.
pub fn compute_rms_stability(signal: &[f32]) -> f64 {
    let rms = frame_rms(signal, RMS_FRAME_LENGTH, RMS_HOP_LENGTH);
    if rms.is_empty() {
        return 0.0;
    }

    let n = rms.len() as f64;
    let mean = rms.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }

    let variance = rms.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let cv = variance.sqrt() / mean;

    debug!(frames = rms.len(), cv, "RMS coefficient of variation");
    rms_stability_from_cv(cv)
}

/// Pause score of the whole signal; 0.0 for an empty signal.
pub fn compute_pause_score(signal: &[f32]) -> f64 {
    pause_score_for(signal.len(), &speech_intervals(signal))
}

/// Speaking-rate score; 0.0 when the transcript has no words or no speech was found.
pub fn compute_speaking_rate_score(transcript: &str, signal: &[f32]) -> f64 {
    speaking_rate_score_for(transcript, &speech_intervals(signal))
}

/// Computes all delivery metrics, rounded to three decimals.
pub fn analyze_delivery(signal: &[f32], transcript: &str) -> DeliveryMetrics {
    let intervals = speech_intervals(signal);

    let rms_stability = compute_rms_stability(signal);
    let pause_score = pause_score_for(signal.len(), &intervals);
    let speaking_rate_score = speaking_rate_score_for(transcript, &intervals);

    let delivery_stability = RMS_WEIGHT * rms_stability + PAUSE_WEIGHT * pause_score;

    let metrics = DeliveryMetrics {
        rms_stability: round_to(rms_stability, 3),
        pause_score: round_to(pause_score, 3),
        speaking_rate_score: round_to(speaking_rate_score, 3),
        delivery_stability: round_to(delivery_stability, 3),
    };

    debug!(
        samples = signal.len(),
        intervals = intervals.len(),
        rms_stability = metrics.rms_stability,
        pause_score = metrics.pause_score,
        speaking_rate_score = metrics.speaking_rate_score,
        delivery_stability = metrics.delivery_stability,
        "Delivery metrics computed"
    );

    metrics
}

fn speech_intervals(signal: &[f32]) -> Vec<SpeechInterval> {
    split_speech(signal, SILENCE_TOP_DB, SPLIT_FRAME_LENGTH, SPLIT_HOP_LENGTH)
}

fn seconds(samples: usize) -> f64 {
    samples as f64 / f64::from(SAMPLE_RATE)
}

fn speech_seconds(intervals: &[SpeechInterval]) -> f64 {
    seconds(intervals.iter().map(SpeechInterval::len).sum())
}

fn pause_score_for(total_samples: usize, intervals: &[SpeechInterval]) -> f64 {
    let total = seconds(total_samples);
    if total == 0.0 {
        return 0.0;
    }

    let silence = (total - speech_seconds(intervals)).max(0.0);
    let pause_ratio = silence / total;

    debug!(pause_ratio, "Pause ratio");
    pause_score_from_ratio(pause_ratio)
}

fn speaking_rate_score_for(transcript: &str, intervals: &[SpeechInterval]) -> f64 {
    let words = transcript.split_whitespace().count();
    if words == 0 {
        return 0.0;
    }

    let speaking_time = speech_seconds(intervals);
    if speaking_time == 0.0 {
        return 0.0;
    }

    let rate = words as f64 / speaking_time;

    debug!(words, speaking_time, rate, "Speaking rate");
    speaking_rate_score_from_rate(rate)
}
