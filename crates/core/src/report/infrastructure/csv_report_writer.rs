use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::report::domain::report_row::ReportRow;
use crate::report::domain::report_writer::{ReportError, ReportWriter};
use crate::shared::constants::REPORT_HEADER;

/// Writes the `fileName,transcript` CSV report and a one-name-per-line log
/// of files that went through the long-running path.
///
/// Both outputs are flushed after every call.
pub struct CsvReportWriter<W: Write + Send = File, L: Write + Send = File> {
    report: csv::Writer<W>,
    long_files: BufWriter<L>,
}

impl CsvReportWriter {
    /// Creates (truncating) both files and writes the CSV header.
    pub fn create(report_path: &Path, long_files_path: &Path) -> Result<Self, ReportError> {
        let report = File::create(report_path).map_err(|e| ReportError::Create {
            path: report_path.to_path_buf(),
            source: e,
        })?;
        let long_files = File::create(long_files_path).map_err(|e| ReportError::Create {
            path: long_files_path.to_path_buf(),
            source: e,
        })?;
        Self::from_writers(report, long_files)
    }
}

impl<W: Write + Send, L: Write + Send> CsvReportWriter<W, L> {
    pub fn from_writers(report: W, long_files: L) -> Result<Self, ReportError> {
        let mut report = csv::Writer::from_writer(report);
        report.write_record(REPORT_HEADER)?;
        report.flush()?;
        Ok(Self {
            report,
            long_files: BufWriter::new(long_files),
        })
    }

    /// Flushes and hands back the underlying writers.
    pub fn into_inner(self) -> Result<(W, L), ReportError> {
        let report = self
            .report
            .into_inner()
            .map_err(|e| ReportError::Io(std::io::Error::other(e.to_string())))?;
        let long_files = self
            .long_files
            .into_inner()
            .map_err(|e| ReportError::Io(e.into_error()))?;
        Ok((report, long_files))
    }
}

impl<W: Write + Send, L: Write + Send> ReportWriter for CsvReportWriter<W, L> {
    fn write_row(&mut self, row: &ReportRow) -> Result<(), ReportError> {
        self.report
            .write_record([row.file_name.as_str(), row.transcript.as_str()])?;
        self.report.flush()?;
        Ok(())
    }

    fn log_long_file(&mut self, file_name: &str) -> Result<(), ReportError> {
        writeln!(self.long_files, "{file_name}")?;
        self.long_files.flush()?;
        Ok(())
    }
}
