pub mod audio_files;
pub mod batch_logger;
pub mod transcribe_batch_use_case;
pub mod transcribe_error;
pub mod transcript_filter;
