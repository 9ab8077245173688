use crate::file_processor::FileMetadata;
use crate::lexical::AnalysisRun;
use crate::symbols::SymbolTable;
use crate::tokens::TokenStream;
use std::path::PathBuf;
use std::time::Duration;

/// What a single `analyze_file` call produced
#[derive(Debug)]
pub enum AnalysisOutcome {
    /// The input was scanned; the report may or may not have been written
    Completed(Box<PipelineResult>),
    /// The input exists but holds no text. Nothing was scanned or written.
    NoCode,
}

impl AnalysisOutcome {
    /// Tokens were produced
    pub fn is_success(&self) -> bool {
        match self {
            AnalysisOutcome::Completed(result) => result.has_tokens(),
            AnalysisOutcome::NoCode => false,
        }
    }

    pub fn result(&self) -> Option<&PipelineResult> {
        match self {
            AnalysisOutcome::Completed(result) => Some(&**result),
            AnalysisOutcome::NoCode => None,
        }
    }
}

#[derive(Debug)]
pub struct PipelineResult {
    /// Source text after line ending normalization
    pub source: String,
    pub tokens: TokenStream,
    pub symbols: SymbolTable,
    pub run: AnalysisRun,
    pub file_metadata: FileMetadata,
    pub report_path: PathBuf,
    pub report_written: bool,
    pub summary_path: Option<PathBuf>,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn unique_symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn unique_identifier_count(&self) -> usize {
        self.run.registry.len()
    }

    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }

    pub fn log_success(&self, file_path: &str) {
        crate::log_success!(
            crate::logging::codes::success::ANALYSIS_COMPLETE,
            "Lexical analysis pipeline succeeded",
            "file" => file_path,
            "tokens" => self.token_count(),
            "unique_symbols" => self.unique_symbol_count(),
            "unique_identifiers" => self.unique_identifier_count(),
            "gaps" => self.run.metrics.gap_count,
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
