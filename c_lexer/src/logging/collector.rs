//! Per-file event collection with cargo-style output

use super::events::LogEvent;
use crate::config::compile_time::logging::{MAX_ERROR_COLLECTION, MAX_LOG_EVENTS_PER_FILE};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

// ============================================================================
// FILE PROCESSING CONTEXT
// ============================================================================

/// The file currently being analyzed on this thread
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe store of error and warning events keyed by file
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
    file_contexts: Mutex<BTreeMap<PathBuf, FileProcessingContext>>,
    processing_start: Instant,
}

/// A poisoned lock still holds consistent event data
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
            file_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event for a file, capped per file and globally
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = lock(&self.file_events);

        let total: usize = events.values().map(Vec::len).sum();
        if total >= MAX_ERROR_COLLECTION {
            return;
        }

        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < MAX_LOG_EVENTS_PER_FILE {
            file_events.push(event);
        } else if file_events.len() == MAX_LOG_EVENTS_PER_FILE {
            // One marker event once the cap is reached
            file_events.push(LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            )));
        }
    }

    pub fn record_file_context(&self, context: FileProcessingContext) {
        lock(&self.file_contexts).insert(context.file_path.clone(), context);
    }

    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        lock(&self.file_events)
            .get(file_path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_file_error_count(&self, file_path: &Path) -> usize {
        lock(&self.file_events)
            .get(file_path)
            .map(|events| events.iter().filter(|e| e.is_error()).count())
            .unwrap_or(0)
    }

    pub fn get_file_warning_count(&self, file_path: &Path) -> usize {
        lock(&self.file_events)
            .get(file_path)
            .map(|events| events.iter().filter(|e| e.is_warning()).count())
            .unwrap_or(0)
    }

    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        lock(&self.file_events).clone()
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        let events = lock(&self.file_events);
        let contexts = lock(&self.file_contexts);

        let mut summary = ProcessingSummary {
            total_files: contexts.len().max(events.len()),
            total_processing_time: self.processing_start.elapsed(),
            ..ProcessingSummary::default()
        };

        for file_events in events.values() {
            let errors = file_events.iter().filter(|e| e.is_error()).count();
            let warnings = file_events.iter().filter(|e| e.is_warning()).count();

            if errors > 0 {
                summary.failed_files += 1;
            } else if warnings > 0 {
                summary.files_with_warnings += 1;
            }

            summary.total_errors += errors;
            summary.total_warnings += warnings;
        }

        summary
    }

    /// Errors whose code requires the run to halt
    pub fn get_critical_errors(&self) -> Vec<(PathBuf, LogEvent)> {
        lock(&self.file_events)
            .iter()
            .flat_map(|(path, events)| {
                events
                    .iter()
                    .filter(|e| e.is_error() && e.requires_halt())
                    .map(move |e| (path.clone(), e.clone()))
            })
            .collect()
    }

    pub fn clear(&self) {
        lock(&self.file_events).clear();
        lock(&self.file_contexts).clear();
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

fn span_suffix(file_path: &Path, event: &LogEvent) -> String {
    event
        .span
        .as_ref()
        .map(|s| {
            format!(
                " --> {}:{}:{}",
                file_path.display(),
                s.start().line,
                s.start().column
            )
        })
        .unwrap_or_default()
}

fn push_context(output: &mut String, event: &LogEvent) {
    for (key, value) in &event.context {
        if key != "file" {
            output.push_str(&format!("  = {}: {}\n", key, value));
        }
    }
}

/// Format collected errors and warnings like cargo diagnostics
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        if events.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", file_path.display()));

        for event in events.iter().filter(|e| e.is_error()) {
            output.push_str(&format!(
                "error[{}]: {}{}\n",
                event.code,
                event.message,
                span_suffix(file_path, event)
            ));
            output.push_str(&format!(
                "  = severity: {}, category: {}\n",
                event.severity(),
                event.category()
            ));
            push_context(&mut output, event);

            let action = event.recommended_action();
            if action != "No specific action available" {
                output.push_str(&format!("  = help: {}\n", action));
            }
        }

        for event in events.iter().filter(|e| e.is_warning()) {
            output.push_str(&format!(
                "warning[{}]: {}{}\n",
                event.code,
                event.message,
                span_suffix(file_path, event)
            ));
            push_context(&mut output, event);
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    if summary.total_errors > 0 {
        output.push_str(&format!("Total errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::{Position, Span};

    #[test]
    fn test_error_collector_basic() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("input_code.txt");

        collector.record_event(
            &file_path,
            LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "Missing"),
        );

        assert_eq!(collector.get_file_events(&file_path).len(), 1);
        assert_eq!(collector.get_file_error_count(&file_path), 1);
        assert_eq!(collector.get_file_warning_count(&file_path), 0);
    }

    #[test]
    fn test_processing_summary() {
        let collector = ErrorCollector::new();
        let file1 = PathBuf::from("a.c");
        let file2 = PathBuf::from("b.c");

        collector.record_event(
            &file1,
            LogEvent::error(codes::lexical::TOO_MANY_TOKENS, "Error"),
        );
        collector.record_event(
            &file2,
            LogEvent::warning_with_code(codes::lexical::UNMATCHED_INPUT, "Warning"),
        );

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.files_with_warnings, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
    }

    #[test]
    fn test_per_file_cap_adds_single_marker() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("noisy.c");

        for _ in 0..MAX_LOG_EVENTS_PER_FILE + 5 {
            collector.record_event(&file_path, LogEvent::warning("gap"));
        }

        let events = collector.get_file_events(&file_path);
        assert_eq!(events.len(), MAX_LOG_EVENTS_PER_FILE + 1);
        assert!(events[MAX_LOG_EVENTS_PER_FILE]
            .message
            .contains("Too many events"));
    }

    #[test]
    fn test_critical_errors() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("input_code.txt");

        collector.record_event(
            &file_path,
            LogEvent::error(codes::system::INTERNAL_ERROR, "Critical error"),
        );
        collector.record_event(
            &file_path,
            LogEvent::warning_with_code(codes::lexical::UNMATCHED_INPUT, "Skipped"),
        );

        let critical = collector.get_critical_errors();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].1.code.as_str(), "ERR001");
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("input_code.txt");
        let span = Span::new(Position::new(6, 2, 3), Position::new(7, 2, 4));

        collector.record_event(
            &file_path,
            LogEvent::warning_with_code(codes::lexical::UNMATCHED_INPUT, "Skipped '&'")
                .with_span(span)
                .with_context("text", "&"),
        );

        let output = format_cargo_style_errors(&collector);
        assert!(output.contains("Checking input_code.txt..."));
        assert!(output.contains("warning[W020]: Skipped '&' --> input_code.txt:2:3"));
        assert!(output.contains("  = text: &"));
        assert!(output.contains("Total warnings: 1"));
    }
}
