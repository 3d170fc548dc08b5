use std::path::PathBuf;

use thiserror::Error;

use super::report_row::ReportRow;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write report row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Domain interface for the batch output.
///
/// Every call is durable on return: a batch that stops early keeps the
/// rows written so far.
pub trait ReportWriter: Send {
    fn write_row(&mut self, row: &ReportRow) -> Result<(), ReportError>;

    /// Records a file that needed the long-running path.
    fn log_long_file(&mut self, file_name: &str) -> Result<(), ReportError>;
}
