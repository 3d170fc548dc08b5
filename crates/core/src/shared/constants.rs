use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://speech.googleapis.com/v1beta1";

pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 8000;
pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";

/// Alternatives must score strictly above this to reach the report.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Delay before each status fetch of a long-running operation.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub const DEFAULT_AUDIO_EXTENSION: &str = "wav";

/// Transcript written when nothing usable came back.
pub const NA_TRANSCRIPT: &str = "NA";

pub const REPORT_HEADER: [&str; 2] = ["fileName", "transcript"];

pub const DEFAULT_INPUT_DIR: &str = "voicemessages";
pub const DEFAULT_REPORT_FILE: &str = "ResponsesFile.csv";
pub const DEFAULT_LONG_FILES_LOG: &str = "LongAudiofiles.txt";
