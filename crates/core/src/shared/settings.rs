use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::{
    DEFAULT_AUDIO_EXTENSION, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_ENDPOINT,
    DEFAULT_LANGUAGE_CODE, DEFAULT_POLL_INTERVAL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SAMPLE_RATE_HZ,
};
use crate::speech::domain::transcription_request::{AudioEncoding, RecognitionConfig};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

/// How the speech client authenticates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credentials {
    /// Sent as the `key` query parameter.
    ApiKey(String),
    /// OAuth2 access token, sent as a bearer header.
    AccessToken(String),
}

/// Runtime configuration for a batch run.
///
/// Every field has a default, so a settings file only needs the values it
/// changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub endpoint: String,
    pub credentials: Option<Credentials>,
    pub encoding: AudioEncoding,
    pub sample_rate_hz: u32,
    pub language_code: String,
    pub confidence_threshold: f32,
    pub poll_interval_secs: u64,
    /// Upper bound on status fetches per operation. `None` polls forever.
    pub max_polls: Option<u32>,
    pub request_timeout_secs: u64,
    pub audio_extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials: None,
            encoding: AudioEncoding::Linear16,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            max_polls: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            audio_extension: DEFAULT_AUDIO_EXTENSION.to_string(),
        }
    }
}

impl Settings {
    /// `~/.config/speechbatch/settings.json` (platform equivalent elsewhere).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("speechbatch").join("settings.json"))
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Loads the per-user settings file if there is one, else defaults.
    pub fn load_default() -> Result<Self, SettingsError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(SettingsError::Invalid(format!(
                "Confidence threshold must be between 0.0 and 1.0, got {}",
                self.confidence_threshold
            )));
        }
        if self.sample_rate_hz == 0 {
            return Err(SettingsError::Invalid(
                "Sample rate must be a positive integer".to_string(),
            ));
        }
        if self.poll_interval_secs == 0 {
            return Err(SettingsError::Invalid(
                "Poll interval must be at least one second".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(SettingsError::Invalid(
                "Request timeout must be at least one second".to_string(),
            ));
        }
        if self.max_polls == Some(0) {
            return Err(SettingsError::Invalid(
                "Max polls must be positive when set".to_string(),
            ));
        }
        if self.language_code.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "Language code must not be empty".to_string(),
            ));
        }
        if self.audio_extension.trim_start_matches('.').is_empty() {
            return Err(SettingsError::Invalid(
                "Audio extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn recognition_config(&self) -> RecognitionConfig {
        RecognitionConfig {
            encoding: self.encoding,
            sample_rate_hz: self.sample_rate_hz,
            language_code: self.language_code.clone(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
