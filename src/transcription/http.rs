use std::future::Future;
use std::io::Cursor;
use std::time::Duration;

use hound::{SampleFormat, WavSpec, WavWriter};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info};

use super::error::TranscriptionError;
use crate::constants::SAMPLE_RATE;

/// Speech-to-text over a normalized 16 kHz mono signal.
pub trait Transcriber: Send + Sync {
    fn transcribe(
        &self,
        signal: &[f32],
    ) -> impl Future<Output = Result<String, TranscriptionError>> + Send;

    /// `false` when every call is known to fail.
    fn is_available(&self) -> bool {
        true
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for an OpenAI-compatible `/v1/audio/transcriptions` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTranscriber {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpTranscriber {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    pub fn new(base_url: &str, model: impl Into<String>) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()?;
        let url = format!(
            "{}/v1/audio/transcriptions",
            base_url.trim_end_matches('/')
        );
        let model = model.into();

        info!(url = %url, model = %model, "HTTP transcriber configured");
        Ok(Self {
            client,
            url,
            model,
            api_key: None,
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// 16-bit PCM WAV at [`SAMPLE_RATE`].
    pub fn encode_wav(signal: &[f32]) -> Result<Vec<u8>, TranscriptionError> {
        let spec = WavSpec {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::with_capacity(44 + signal.len() * 2));
        {
            let mut writer = WavWriter::new(&mut cursor, spec)?;
            for s in signal {
                writer.write_sample((s.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16)?;
            }
            writer.finalize()?;
        }
        Ok(cursor.into_inner())
    }
}

impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, signal: &[f32]) -> Result<String, TranscriptionError> {
        let wav = Self::encode_wav(signal)?;
        debug!(bytes = wav.len(), "Uploading audio for transcription");

        let file = Part::bytes(wav)
            .file_name("answer.wav")
            .mime_str("audio/wav")?;
        let form = Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("language", "en")
            .text("response_format", "json");

        let mut request = self.client.post(&self.url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranscriptionResponse = response.json().await?;
        let text = parsed.text.trim().to_string();
        debug!(chars = text.len(), "Transcription received");
        Ok(text)
    }
}

/// Stands in when no endpoint is configured; every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTranscriber;

impl Transcriber for UnavailableTranscriber {
    async fn transcribe(&self, _signal: &[f32]) -> Result<String, TranscriptionError> {
        Err(TranscriptionError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}

/// Transcriber chosen from configuration at startup.
#[derive(Debug, Clone)]
pub enum ConfiguredTranscriber {
    Http(HttpTranscriber),
    Unavailable(UnavailableTranscriber),
}

impl ConfiguredTranscriber {
    /// HTTP client when `base_url` is set, otherwise [`UnavailableTranscriber`].
    pub fn from_parts(
        base_url: Option<&str>,
        model: &str,
        api_key: Option<&str>,
    ) -> Result<Self, TranscriptionError> {
        let Some(base_url) = base_url else {
            return Ok(Self::Unavailable(UnavailableTranscriber));
        };

        let mut client = HttpTranscriber::new(base_url, model)?;
        if let Some(key) = api_key {
            client = client.with_api_key(key);
        }
        Ok(Self::Http(client))
    }
}

impl Transcriber for ConfiguredTranscriber {
    async fn transcribe(&self, signal: &[f32]) -> Result<String, TranscriptionError> {
        match self {
            Self::Http(inner) => inner.transcribe(signal).await,
            Self::Unavailable(inner) => inner.transcribe(signal).await,
        }
    }

    fn is_available(&self) -> bool {
        match self {
            Self::Http(inner) => inner.is_available(),
            Self::Unavailable(inner) => inner.is_available(),
        }
    }
}
