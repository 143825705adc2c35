use std::io::Cursor;
use std::path::Path;

use hound::{SampleFormat, WavReader};
use rubato::{FastFixedIn, PolynomialDegree, Resampler};
use tracing::debug;

use super::error::AudioError;
use crate::constants::{SAMPLE_RATE, SILENCE_TOP_DB, SPLIT_FRAME_LENGTH, SPLIT_HOP_LENGTH};
use crate::delivery::trim_silence;

/// Turns an uploaded recording into a normalized mono signal at 16 kHz.
pub trait AudioPreprocessor: Send + Sync {
    fn preprocess_path(&self, path: &Path) -> Result<Vec<f32>, AudioError>;

    fn preprocess_wav(&self, bytes: &[u8]) -> Result<Vec<f32>, AudioError>;
}

/// WAV decoder: mono mix-down, resampling, silence trim, peak normalisation.
#[derive(Debug, Clone, Copy)]
pub struct WavPreprocessor {
    target_rate: u32,
    top_db: f64,
}

impl Default for WavPreprocessor {
    fn default() -> Self {
        Self {
            target_rate: SAMPLE_RATE,
            top_db: SILENCE_TOP_DB,
        }
    }
}

impl WavPreprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_rate(&self) -> u32 {
        self.target_rate
    }

    fn decode(bytes: &[u8]) -> Result<(Vec<f32>, u32), AudioError> {
        let mut reader = WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();
        if spec.channels == 0 {
            return Err(AudioError::Unsupported {
                reason: "zero channels".to_string(),
            });
        }

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
            SampleFormat::Int => {
                if !(1..=32).contains(&spec.bits_per_sample) {
                    return Err(AudioError::Unsupported {
                        reason: format!("{} bits per sample", spec.bits_per_sample),
                    });
                }
                let scale = (1u64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()?
            }
        };

        let channels = usize::from(spec.channels);
        let mono = if channels == 1 {
            interleaved
        } else {
            interleaved
                .chunks_exact(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                .collect()
        };

        debug!(
            sample_rate = spec.sample_rate,
            channels,
            bits = spec.bits_per_sample,
            samples = mono.len(),
            "WAV decoded"
        );
        Ok((mono, spec.sample_rate))
    }

    fn resample(&self, signal: Vec<f32>, source_rate: u32) -> Result<Vec<f32>, AudioError> {
        if source_rate == self.target_rate {
            return Ok(signal);
        }

        let ratio = f64::from(self.target_rate) / f64::from(source_rate);
        // Whole recording as one chunk.
        let mut resampler =
            FastFixedIn::<f32>::new(ratio, 1.1, PolynomialDegree::Septic, signal.len(), 1)
                .map_err(|e| AudioError::Resample {
                    reason: e.to_string(),
                })?;
        let mut output = resampler
            .process(&[&signal], None)
            .map_err(|e| AudioError::Resample {
                reason: e.to_string(),
            })?;

        debug!(from = source_rate, to = self.target_rate, "Resampled");
        Ok(output.pop().unwrap_or_default())
    }
}

impl AudioPreprocessor for WavPreprocessor {
    fn preprocess_path(&self, path: &Path) -> Result<Vec<f32>, AudioError> {
        let bytes = std::fs::read(path).map_err(|source| AudioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.preprocess_wav(&bytes)
    }

    fn preprocess_wav(&self, bytes: &[u8]) -> Result<Vec<f32>, AudioError> {
        let (signal, source_rate) = Self::decode(bytes)?;
        if signal.is_empty() {
            return Err(AudioError::Empty);
        }

        let signal = self.resample(signal, source_rate)?;
        let kept = trim_silence(&signal, self.top_db, SPLIT_FRAME_LENGTH, SPLIT_HOP_LENGTH)
            .filter(|interval| !interval.is_empty())
            .ok_or(AudioError::Empty)?;
        let mut signal = signal[kept.start..kept.end].to_vec();

        let peak = signal.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        if peak > 0.0 {
            for s in &mut signal {
                *s /= peak;
            }
        }

        debug!(samples = signal.len(), peak, "Audio preprocessed");
        Ok(signal)
    }
}
