//! Report and summary persistence

use super::summary::AnalysisSummary;
use crate::logging::codes::{self, Code, Severity};
use crate::{log_error, log_success};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report to '{path}': {message}")]
    WriteFailed { path: String, message: String },

    #[error("Failed to serialize analysis summary: {message}")]
    SummarySerialization { message: String },
}

impl ReportError {
    pub fn error_code(&self) -> Code {
        match self {
            ReportError::WriteFailed { .. } => codes::report::REPORT_WRITE_FAILED,
            ReportError::SummarySerialization { .. } => {
                codes::report::SUMMARY_SERIALIZATION_FAILED
            }
        }
    }

    pub fn severity(&self) -> Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

/// Write `content` to `path`, replacing anything already there
pub fn write_report(path: &Path, content: &str) -> Result<(), ReportError> {
    match fs::write(path, content) {
        Ok(()) => {
            log_success!(codes::success::REPORT_WRITTEN, "Report written",
                "path" => path.display(),
                "bytes" => content.len());
            Ok(())
        }
        Err(e) => {
            let error = ReportError::WriteFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            };
            log_error!(error.error_code(), "Failed to write report",
                "path" => path.display(),
                "io_error" => e);
            Err(error)
        }
    }
}

/// Serialize the summary as pretty JSON and write it to `path`
pub fn write_json_summary(path: &Path, summary: &AnalysisSummary<'_>) -> Result<(), ReportError> {
    let json = summary.to_json_pretty().map_err(|error| {
        log_error!(error.error_code(), &error.to_string());
        error
    })?;
    write_report(path, &json)
}
