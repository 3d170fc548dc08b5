use thiserror::Error;

use super::async_operation::AsyncOperation;
use super::recognition_result::SyncResult;
use super::transcription_request::TranscriptionRequest;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpeechServiceError {
    #[error("speech service unreachable: {0}")]
    Unavailable(String),
    #[error("speech service rejected the request: {0}")]
    Rejected(String),
    #[error("malformed response from speech service: {0}")]
    MalformedResponse(String),
}

/// Result of a synchronous recognition call.
///
/// `Rejected` is recoverable through the asynchronous path; `Unavailable`
/// means the host could not be reached at all.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncOutcome {
    Success(SyncResult),
    Rejected(String),
    Unavailable(String),
}

impl From<Result<SyncResult, SpeechServiceError>> for SyncOutcome {
    fn from(result: Result<SyncResult, SpeechServiceError>) -> Self {
        match result {
            Ok(r) => SyncOutcome::Success(r),
            Err(SpeechServiceError::Unavailable(msg)) => SyncOutcome::Unavailable(msg),
            Err(SpeechServiceError::Rejected(msg)) => SyncOutcome::Rejected(msg),
            Err(SpeechServiceError::MalformedResponse(msg)) => SyncOutcome::Rejected(msg),
        }
    }
}

/// Domain interface for a remote speech-recognition service.
pub trait SpeechService: Send {
    fn submit_sync(&self, request: &TranscriptionRequest) -> SyncOutcome;

    /// Starts a long-running recognition and returns its handle.
    fn submit_async(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<AsyncOperation, SpeechServiceError>;

    /// Fetches the current state of a previously submitted operation.
    fn poll_operation(&self, name: &str) -> Result<AsyncOperation, SpeechServiceError>;
}
