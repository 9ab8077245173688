//! Single entry operation: read the input, scan it, build the symbol table,
//! write the report

mod error;
mod result;
mod validation;

pub use error::{InputFailure, PipelineError};
pub use result::{AnalysisOutcome, PipelineResult};
pub use validation::validate_pipeline;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::{FileProcessor, FileProcessorError};
use crate::lexical::{AnalysisRun, LexicalAnalyzer};
use crate::logging;
use crate::report::{self, AnalysisSummary};
use crate::symbols::{self, SymbolTable};
use crate::tokens::TokenStream;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Analyze `input` and write the report to `output` with default preferences
pub fn analyze_file(input: &Path, output: &Path) -> Result<AnalysisOutcome, PipelineError> {
    analyze_file_with_config(input, output, &RuntimeConfig::default())
}

pub fn analyze_file_with_config(
    input: &Path,
    output: &Path,
    config: &RuntimeConfig,
) -> Result<AnalysisOutcome, PipelineError> {
    let start_time = Instant::now();
    let input_display = input.display().to_string();

    logging::with_file_context(input.to_path_buf(), 0, || -> Result<AnalysisOutcome, PipelineError> {
        crate::log_info!("Starting lexical analysis pipeline",
            "input" => input_display.as_str(),
            "output" => output.display());

        // Stage 1: read
        let processor = FileProcessor::from_preferences(&config.file_processor);
        let file_result = match processor.process_file(input) {
            Ok(file_result) => file_result,
            Err(FileProcessorError::EmptyFile) => {
                crate::log_info!("Input holds no code, nothing to analyze",
                    "input" => input_display.as_str());
                return Ok(AnalysisOutcome::NoCode);
            }
            Err(e) => return Err(e.into()),
        };

        // Stage 2: scan
        let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone())
            .with_symbol_preferences(config.symbols.clone());
        let tokens = analyzer.tokenize_file_result(&file_result)?;
        let run = analyzer.into_run();

        // Stage 3: symbol table
        let symbols =
            symbols::build_symbol_table_with_preferences(&tokens, config.symbols.clone())?;

        // Stage 4: report
        let report_written = if !tokens.is_empty() || config.report.write_report_without_tokens {
            let content = report::render_report(&file_result.source, &tokens, &symbols);
            report::write_report(output, &content)?;
            true
        } else {
            crate::log_info!("No tokens produced, report skipped", "output" => output.display());
            false
        };

        let mut result = PipelineResult {
            source: file_result.source,
            tokens,
            symbols,
            run,
            file_metadata: file_result.metadata,
            report_path: output.to_path_buf(),
            report_written,
            summary_path: None,
            processing_duration: start_time.elapsed(),
        };

        if let Some(path) = config.report.json_summary_path.as_deref() {
            result.summary_path = write_summary(&result, &input_display, Path::new(path));
        }

        result.log_success(&input_display);
        Ok(AnalysisOutcome::Completed(Box::new(result)))
    })
}

/// Scan and build the symbol table for in-memory source, without touching the filesystem
pub fn analyze_source(source: &str) -> Result<(TokenStream, SymbolTable, AnalysisRun), PipelineError> {
    let mut analyzer = LexicalAnalyzer::new();
    let tokens = analyzer.tokenize(source)?;
    let symbols = symbols::build_symbol_table(&tokens)?;
    Ok((tokens, symbols, analyzer.into_run()))
}

/// A failed summary is logged and leaves the run successful
fn write_summary(result: &PipelineResult, input: &str, path: &Path) -> Option<PathBuf> {
    let summary = AnalysisSummary {
        input: input.to_string(),
        report: result.report_path.display().to_string(),
        analyzed_at: chrono::Utc::now(),
        build_profile: crate::config::build_info::profile(),
        total_tokens: result.token_count(),
        total_unique_symbols: result.unique_symbol_count(),
        total_unique_identifiers: result.unique_identifier_count(),
        tokens: &result.tokens,
        symbols: &result.symbols,
        identifiers: &result.run.registry,
        metrics: &result.run.metrics,
        diagnostics: &result.run.diagnostics,
    };

    report::write_json_summary(path, &summary)
        .ok()
        .map(|()| path.to_path_buf())
}
