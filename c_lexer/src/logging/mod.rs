//! Global logging module for the lexer
//!
//! Provides thread-safe global logging with per-file error collection,
//! cargo-style diagnostics, and a macro interface.

pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::utils::Span;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use collector::{ErrorCollector, FileProcessingContext, ProcessingSummary};
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();
static GLOBAL_ERROR_COLLECTOR: OnceLock<Arc<ErrorCollector>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileProcessingContext>> = RefCell::new(None);
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());
    init_global_logging_with_service(logging_service.clone())?;

    // Codes every stage depends on must carry metadata
    let required_codes = [
        codes::system::INTERNAL_ERROR,
        codes::file_processing::FILE_NOT_FOUND,
        codes::lexical::UNMATCHED_INPUT,
        codes::report::REPORT_WRITE_FAILED,
    ];
    for code in required_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with a custom service (tests and embedders)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized")?;

    GLOBAL_ERROR_COLLECTOR
        .set(Arc::new(ErrorCollector::new()))
        .map_err(|_| "Global error collector already initialized")?;

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some() && GLOBAL_ERROR_COLLECTOR.get().is_some()
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

pub fn try_get_global_error_collector() -> Option<&'static ErrorCollector> {
    GLOBAL_ERROR_COLLECTOR
        .get()
        .map(|collector| collector.as_ref())
}

// ============================================================================
// FILE CONTEXT MANAGEMENT
// ============================================================================

/// Set file context for current thread
pub fn set_file_context(file_path: PathBuf, file_id: usize) {
    let context = FileProcessingContext::new(file_path, file_id);

    if let Some(collector) = try_get_global_error_collector() {
        collector.record_file_context(context.clone());
    }

    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(context);
    });
}

/// Clear file context for current thread
pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with file context
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_file_context(file_path, file_id);
    let result = f();
    clear_file_context();
    result
}

pub fn get_current_file_context() -> Option<FileProcessingContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Attach span, context pairs and file context, then log and optionally collect
fn dispatch(mut event: LogEvent, span: Option<Span>, context: Vec<(&str, String)>, collect: bool) {
    event.message = config::truncate_message(&event.message);

    if let Some(s) = span {
        event = event.with_span(s);
    }

    for (key, value) in &context {
        event = event.with_context(key, value);
    }

    let file_ctx = get_current_file_context();
    if config::include_file_context() {
        if let Some(ctx) = &file_ctx {
            event = event.with_context("file", &ctx.file_path.display().to_string());
        }
    }

    if collect {
        if let (Some(ctx), Some(collector)) = (&file_ctx, try_get_global_error_collector()) {
            collector.record_event(&ctx.file_path, event.clone());
        }
    }

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<Span>,
    context: Vec<(&str, String)>,
) {
    dispatch(LogEvent::error(code, message), span, context, true);
}

/// Used by `log_warning!`
pub fn log_warning_with_context(
    code: Option<Code>,
    message: &str,
    span: Option<Span>,
    context: Vec<(&str, String)>,
) {
    let event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    dispatch(event, span, context, true);
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, String)>) {
    dispatch(LogEvent::success(code, message), None, context, false);
}

/// Used by `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, String)>) {
    dispatch(LogEvent::info(message), None, context, false);
}

/// Used by `log_debug!`
pub fn log_debug_with_context(message: &str, context: Vec<(&str, String)>) {
    dispatch(LogEvent::debug(message), None, context, false);
}

// ============================================================================
// SUMMARIES
// ============================================================================

pub fn get_processing_summary() -> ProcessingSummary {
    try_get_global_error_collector()
        .map(|collector| collector.get_summary())
        .unwrap_or_default()
}

/// Errors and warnings recorded for one file
pub fn get_file_events(file_path: &Path) -> Vec<LogEvent> {
    try_get_global_error_collector()
        .map(|collector| collector.get_file_events(file_path))
        .unwrap_or_default()
}

/// Print the cargo-style diagnostics summary to stderr
pub fn print_cargo_style_summary() {
    if !config::use_cargo_style_output() {
        return;
    }
    if let Some(collector) = try_get_global_error_collector() {
        let summary = collector.get_summary();
        if summary.total_errors > 0 || summary.total_warnings > 0 {
            eprintln!("{}", collector::format_cargo_style_errors(collector));
        }
    }
}

pub fn clear_error_collection() {
    if let Some(collector) = try_get_global_error_collector() {
        collector.clear();
    }
}

pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();

    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));

    if let Some(collector) = try_get_global_error_collector() {
        let summary = collector.get_summary();
        diagnostics.push_str(&format!("Files processed: {}\n", summary.total_files));
        diagnostics.push_str(&format!("Total errors: {}\n", summary.total_errors));
        diagnostics.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    diagnostics.push('\n');
    diagnostics.push_str(&config::get_config_summary());

    diagnostics
}

// ============================================================================
// SAFE FALLBACK LOGGING
// ============================================================================

/// Error logging that falls back to stderr when uninitialized
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}
