use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::logging::codes::{self, Code, Severity};
use crate::report::ReportError;
use crate::symbols::SymbolError;

/// How an unusable input failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFailure {
    NotFound,
    Unreadable,
}

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("Symbol table construction failed: {0}")]
    SymbolTable(#[from] SymbolError),

    #[error("Report output failed: {0}")]
    Report(#[from] ReportError),
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::LexicalAnalysis(e) => e.error_code(),
            PipelineError::SymbolTable(e) => e.error_code(),
            PipelineError::Report(e) => e.error_code(),
        }
    }

    pub fn severity(&self) -> Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Set when the input resource could not be used at all
    pub fn input_failure(&self) -> Option<InputFailure> {
        match self {
            PipelineError::FileProcessing(e) if e.is_not_found() => Some(InputFailure::NotFound),
            PipelineError::FileProcessing(_) => Some(InputFailure::Unreadable),
            _ => None,
        }
    }
}
