//! Frame-level signal statistics shared by the delivery metrics and the preprocessor.

use crate::constants::POWER_FLOOR;

/// Half-open sample range `[start, end)` classified as speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechInterval {
    pub start: usize,
    pub end: usize,
}

impl SpeechInterval {
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Short-time RMS energy with centred, zero-padded frames.
///
/// The signal is padded with `frame_length / 2` zeros on both sides, giving
/// `1 + len / hop_length` frames. An empty signal yields no frames.
pub fn frame_rms(signal: &[f32], frame_length: usize, hop_length: usize) -> Vec<f64> {
    if signal.is_empty() || frame_length == 0 || hop_length == 0 {
        return Vec::new();
    }

    let pad = frame_length / 2;
    let padded_len = signal.len() + 2 * pad;
    if padded_len < frame_length {
        return Vec::new();
    }
    let n_frames = 1 + (padded_len - frame_length) / hop_length;

    (0..n_frames)
        .map(|frame| {
            // Frame start in padded coordinates; shift back into the signal.
            let start = frame * hop_length;
            let lo = start.saturating_sub(pad).min(signal.len());
            let hi = (start + frame_length).saturating_sub(pad).min(signal.len());
            let energy: f64 = signal[lo..hi]
                .iter()
                .map(|&s| {
                    let s = f64::from(s);
                    s * s
                })
                .sum();
            (energy / frame_length as f64).sqrt()
        })
        .collect()
}

/// Marks frames whose power is within `top_db` of the loudest frame.
pub fn non_silent_frames(
    signal: &[f32],
    top_db: f64,
    frame_length: usize,
    hop_length: usize,
) -> Vec<bool> {
    let rms = frame_rms(signal, frame_length, hop_length);
    let peak_power = rms.iter().fold(0.0f64, |acc, r| acc.max(r * r));
    let ref_db = 10.0 * peak_power.max(POWER_FLOOR).log10();

    rms.iter()
        .map(|r| {
            let db = 10.0 * (r * r).max(POWER_FLOOR).log10() - ref_db;
            db > -top_db
        })
        .collect()
}

/// Splits a signal into non-silent intervals.
///
/// Frame boundaries are converted to sample offsets with `hop_length` and clamped to
/// the signal length. A signal with no energy at all is reported as one interval,
/// since every frame sits at the power floor and is therefore within `top_db` of it.
pub fn split_speech(
    signal: &[f32],
    top_db: f64,
    frame_length: usize,
    hop_length: usize,
) -> Vec<SpeechInterval> {
    let mask = non_silent_frames(signal, top_db, frame_length, hop_length);
    let mut intervals = Vec::new();
    let mut open: Option<usize> = None;

    for (frame, &voiced) in mask.iter().enumerate() {
        match (voiced, open) {
            (true, None) => open = Some(frame),
            (false, Some(start)) => {
                intervals.push(to_samples(start, frame, hop_length, signal.len()));
                open = None;
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        intervals.push(to_samples(start, mask.len(), hop_length, signal.len()));
    }

    intervals
}

/// Returns the `[start, end)` range left after trimming leading and trailing silence.
///
/// `None` when no frame is loud enough to keep.
pub fn trim_silence(
    signal: &[f32],
    top_db: f64,
    frame_length: usize,
    hop_length: usize,
) -> Option<SpeechInterval> {
    let mask = non_silent_frames(signal, top_db, frame_length, hop_length);
    let first = mask.iter().position(|&v| v)?;
    let last = mask.iter().rposition(|&v| v)?;

    Some(to_samples(first, last + 1, hop_length, signal.len()))
}

fn to_samples(start_frame: usize, end_frame: usize, hop_length: usize, len: usize) -> SpeechInterval {
    SpeechInterval {
        start: (start_frame * hop_length).min(len),
        end: (end_frame * hop_length).min(len),
    }
}
