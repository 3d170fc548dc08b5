use crate::shared::constants::NA_TRANSCRIPT;

/// One line of the batch report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub file_name: String,
    pub transcript: String,
}

impl ReportRow {
    pub fn new(file_name: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            transcript: transcript.into(),
        }
    }

    /// Row for a file whose response carried nothing usable.
    pub fn not_available(file_name: impl Into<String>) -> Self {
        Self::new(file_name, NA_TRANSCRIPT)
    }

    pub fn is_not_available(&self) -> bool {
        self.transcript == NA_TRANSCRIPT
    }
}
