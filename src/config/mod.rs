//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `VIVA_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::{
    DEFAULT_BONUS_THRESHOLD, DEFAULT_MAX_AUDIO_BYTES, DEFAULT_MAX_BONUS, DEFAULT_TOP_K_EVIDENCE,
    WEIGHT_SUM_TOLERANCE,
};
use crate::fusion::FusionWeights;

/// Default question bank location.
pub const DEFAULT_QUESTIONS_PATH: &str = "./data/questions/questions.json";

/// Default model name sent to the transcription endpoint.
pub const DEFAULT_TRANSCRIBER_MODEL: &str = "whisper-1";

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `VIVA_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Question bank (JSON array).
    pub questions_path: PathBuf,

    /// Evidence corpus (JSON array of chunks). No evidence without it.
    pub corpus_path: Option<PathBuf>,

    /// Sentence-transformer directory. Stub encoder without it.
    pub encoder_path: Option<PathBuf>,

    /// Base URL of an OpenAI-compatible transcription service.
    pub transcriber_url: Option<String>,

    /// Model name passed to the transcription service. Default: `whisper-1`.
    pub transcriber_model: String,

    /// Bearer token for the transcription service.
    pub transcriber_api_key: Option<String>,

    /// Global fusion weights; per-question weights when `None`.
    pub fusion_weights: Option<FusionWeights>,

    /// Evidence passages requested per evaluation. Default: `5`.
    pub top_k_evidence: usize,

    /// Delivery stability needed for a bonus suggestion. Default: `0.62`.
    pub bonus_threshold: f64,

    /// Upper bound of the suggested bonus. Default: `0.30`.
    pub max_bonus: f64,

    /// Largest accepted audio upload in bytes. Default: 25 MiB.
    pub max_audio_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            questions_path: PathBuf::from(DEFAULT_QUESTIONS_PATH),
            corpus_path: None,
            encoder_path: None,
            transcriber_url: None,
            transcriber_model: DEFAULT_TRANSCRIBER_MODEL.to_string(),
            transcriber_api_key: None,
            fusion_weights: None,
            top_k_evidence: DEFAULT_TOP_K_EVIDENCE,
            bonus_threshold: DEFAULT_BONUS_THRESHOLD,
            max_bonus: DEFAULT_MAX_BONUS,
            max_audio_bytes: DEFAULT_MAX_AUDIO_BYTES,
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "VIVA_PORT";
    pub const ENV_BIND_ADDR: &'static str = "VIVA_BIND_ADDR";
    pub const ENV_QUESTIONS_PATH: &'static str = "VIVA_QUESTIONS_PATH";
    pub const ENV_CORPUS_PATH: &'static str = "VIVA_CORPUS_PATH";
    pub const ENV_ENCODER_PATH: &'static str = "VIVA_ENCODER_PATH";
    pub const ENV_TRANSCRIBER_URL: &'static str = "VIVA_TRANSCRIBER_URL";
    pub const ENV_TRANSCRIBER_MODEL: &'static str = "VIVA_TRANSCRIBER_MODEL";
    pub const ENV_TRANSCRIBER_API_KEY: &'static str = "VIVA_TRANSCRIBER_API_KEY";
    pub const ENV_FUSION_WEIGHTS: &'static str = "VIVA_FUSION_WEIGHTS";
    pub const ENV_TOP_K_EVIDENCE: &'static str = "VIVA_TOP_K_EVIDENCE";
    pub const ENV_BONUS_THRESHOLD: &'static str = "VIVA_BONUS_THRESHOLD";
    pub const ENV_MAX_BONUS: &'static str = "VIVA_MAX_BONUS";
    pub const ENV_MAX_AUDIO_BYTES: &'static str = "VIVA_MAX_AUDIO_BYTES";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let fusion_weights = match Self::parse_optional_string_from_env(Self::ENV_FUSION_WEIGHTS) {
            Some(raw) => Some(parse_fusion_weights(&raw)?),
            None => None,
        };

        Ok(Self {
            port: Self::parse_port_from_env(defaults.port)?,
            bind_addr: Self::parse_bind_addr_from_env(defaults.bind_addr)?,
            questions_path: Self::parse_path_from_env(
                Self::ENV_QUESTIONS_PATH,
                defaults.questions_path,
            ),
            corpus_path: Self::parse_optional_path_from_env(Self::ENV_CORPUS_PATH),
            encoder_path: Self::parse_optional_path_from_env(Self::ENV_ENCODER_PATH),
            transcriber_url: Self::parse_optional_string_from_env(Self::ENV_TRANSCRIBER_URL),
            transcriber_model: Self::parse_optional_string_from_env(Self::ENV_TRANSCRIBER_MODEL)
                .unwrap_or(defaults.transcriber_model),
            transcriber_api_key: Self::parse_optional_string_from_env(
                Self::ENV_TRANSCRIBER_API_KEY,
            ),
            fusion_weights,
            top_k_evidence: Self::parse_number_from_env(
                Self::ENV_TOP_K_EVIDENCE,
                defaults.top_k_evidence,
            )?,
            bonus_threshold: Self::parse_number_from_env(
                Self::ENV_BONUS_THRESHOLD,
                defaults.bonus_threshold,
            )?,
            max_bonus: Self::parse_number_from_env(Self::ENV_MAX_BONUS, defaults.max_bonus)?,
            max_audio_bytes: Self::parse_number_from_env(
                Self::ENV_MAX_AUDIO_BYTES,
                defaults.max_audio_bytes,
            )?,
        })
    }

    /// Validates paths and value ranges (does not read the files).
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_file(&self.questions_path)?;

        if let Some(ref path) = self.corpus_path {
            require_file(path)?;
        }

        if let Some(ref path) = self.encoder_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref weights) = self.fusion_weights {
            check_fusion_weights(weights, &format_weights(weights))?;
        }

        for (name, value) in [
            (Self::ENV_BONUS_THRESHOLD, self.bonus_threshold),
            (Self::ENV_MAX_BONUS, self.max_bonus),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    name,
                    value: value.to_string(),
                    range: "[0, 1]",
                });
            }
        }

        if self.max_audio_bytes == 0 {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_MAX_AUDIO_BYTES,
                value: "0".to_string(),
                range: "[1, usize::MAX]",
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        Self::parse_optional_path_from_env(var_name).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_number_from_env<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
        match Self::parse_optional_string_from_env(name) {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name, value }),
            None => Ok(default),
        }
    }
}

fn require_file(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::PathNotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(ConfigError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Parses `semantic=0.55,keyword=0.20,evidence=0.25`.
pub fn parse_fusion_weights(raw: &str) -> Result<FusionWeights, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidFusionWeights {
        value: raw.to_string(),
        reason,
    };

    let mut weights = FusionWeights::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| invalid(format!("expected name=weight, got '{pair}'")))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid(format!("missing signal name in '{pair}'")));
        }
        let weight: f64 = value
            .trim()
            .parse()
            .map_err(|_| invalid(format!("weight for '{name}' is not a number")))?;
        if weights.insert(name.to_string(), weight).is_some() {
            return Err(invalid(format!("'{name}' given twice")));
        }
    }

    check_fusion_weights(&weights, raw)?;
    Ok(weights)
}

fn check_fusion_weights(weights: &FusionWeights, raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidFusionWeights {
        value: raw.to_string(),
        reason,
    };

    if weights.is_empty() {
        return Err(invalid("no weights given".to_string()));
    }
    if let Some((name, w)) = weights.iter().find(|(_, w)| !w.is_finite() || **w < 0.0) {
        return Err(invalid(format!("'{name}' has invalid weight {w}")));
    }
    let total: f64 = weights.values().sum();
    if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(invalid(format!("weights sum to {total:.3}, expected 1.0")));
    }
    Ok(())
}

fn format_weights(weights: &FusionWeights) -> String {
    weights
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}
