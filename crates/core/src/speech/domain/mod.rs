pub mod async_operation;
pub mod recognition_result;
pub mod speech_service;
pub mod transcription_request;
