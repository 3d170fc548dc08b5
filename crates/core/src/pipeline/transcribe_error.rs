use std::path::PathBuf;

use thiserror::Error;

use crate::report::domain::report_writer::ReportError;
use crate::speech::domain::speech_service::SpeechServiceError;

#[derive(Error, Debug)]
pub enum TranscribeError {
    #[error("failed to read audio file {path}: {source}")]
    ReadAudio {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to list audio directory {path}: {source}")]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("speech service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("request rejected: {0}")]
    RequestRejected(String),
    #[error("malformed service response: {0}")]
    MalformedResponse(String),
    #[error("operation {name} not done after {attempts} polls")]
    Timeout { name: String, attempts: u32 },
    #[error("operation {name} failed with code {code}: {message}")]
    OperationFailed {
        name: String,
        code: i32,
        message: String,
    },
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl TranscribeError {
    /// Errors confined to one file; the batch continues with an `"NA"` row.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            TranscribeError::RequestRejected(_)
                | TranscribeError::MalformedResponse(_)
                | TranscribeError::Timeout { .. }
                | TranscribeError::OperationFailed { .. }
        )
    }
}

impl From<SpeechServiceError> for TranscribeError {
    fn from(e: SpeechServiceError) -> Self {
        match e {
            SpeechServiceError::Unavailable(msg) => TranscribeError::ServiceUnavailable(msg),
            SpeechServiceError::Rejected(msg) => TranscribeError::RequestRejected(msg),
            SpeechServiceError::MalformedResponse(msg) => TranscribeError::MalformedResponse(msg),
        }
    }
}
