use serde::{Deserialize, Serialize};

use crate::shared::constants::{DEFAULT_LANGUAGE_CODE, DEFAULT_SAMPLE_RATE_HZ};

/// Audio encodings accepted by the recognition endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    /// Uncompressed 16-bit signed little-endian samples.
    #[default]
    Linear16,
    Flac,
    Mulaw,
}

impl AudioEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioEncoding::Linear16 => "LINEAR16",
            AudioEncoding::Flac => "FLAC",
            AudioEncoding::Mulaw => "MULAW",
        }
    }
}

impl std::fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognition parameters shared by every request of a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognitionConfig {
    pub encoding: AudioEncoding,
    pub sample_rate_hz: u32,
    pub language_code: String,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            encoding: AudioEncoding::Linear16,
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
        }
    }
}

/// One file's worth of audio plus the parameters to recognize it with.
///
/// Built fresh for every file and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptionRequest {
    audio: Vec<u8>,
    encoding: AudioEncoding,
    sample_rate_hz: u32,
    language_code: String,
}

impl TranscriptionRequest {
    pub fn new(audio: Vec<u8>, config: &RecognitionConfig) -> Self {
        Self {
            audio,
            encoding: config.encoding,
            sample_rate_hz: config.sample_rate_hz,
            language_code: config.language_code.clone(),
        }
    }

    pub fn audio(&self) -> &[u8] {
        &self.audio
    }

    pub fn encoding(&self) -> AudioEncoding {
        self.encoding
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }
}
