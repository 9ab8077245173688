//! Logging service and logger targets

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard};

/// Destination for log events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level-filtering front end over a `Logger`
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Build the service from runtime logging preferences.
    /// Console output goes to stderr so stdout stays free for program output.
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let mut multi = MultiLogger::new(min_level);

        if config::use_console_logging() {
            if config::use_structured_logging() {
                multi.add_logger(Arc::new(StructuredLogger::new(min_level)));
            } else {
                multi.add_logger(Arc::new(ConsoleLogger::new(min_level)));
            }
        }

        Self::new(Arc::new(multi), min_level)
    }

    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    pub fn log_error(&self, error_code: Code, message: &str) {
        self.log_event(LogEvent::error(error_code, message));
    }

    pub fn log_warning_with_code(&self, warning_code: Code, message: &str) {
        self.log_event(LogEvent::warning_with_code(warning_code, message));
    }

    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }

    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }

    pub fn log_debug(&self, message: &str) {
        self.log_event(LogEvent::debug(message));
    }
}

/// Human-readable lines on stderr
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            eprintln!("{}", event.format());
        }
    }
}

/// JSON lines on stderr
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            match event.format_json() {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", event.format()),
            }
        }
    }
}

/// In-memory logger, bounded by the compile-time collection limit
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    fn events(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.events().clone()
    }

    pub fn clear(&self) {
        self.events().clear();
    }

    pub fn event_count(&self) -> usize {
        self.events().len()
    }

    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.events().iter().filter(|e| e.is_error()).cloned().collect()
    }

    pub fn get_warnings(&self) -> Vec<LogEvent> {
        self.events().iter().filter(|e| e.is_warning()).cloned().collect()
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.events().iter().any(|e| e.is_error() && e.code == code)
    }

    pub fn has_warning_with_code(&self, code: Code) -> bool {
        self.events().iter().any(|e| e.is_warning() && e.code == code)
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.events().iter().any(|e| e.is_info() && e.code == code)
    }

    pub fn get_summary(&self) -> EventSummary {
        let events = self.events();

        EventSummary {
            total_count: events.len(),
            error_count: events.iter().filter(|e| e.is_error()).count(),
            warning_count: events.iter().filter(|e| e.is_warning()).count(),
            info_count: events.iter().filter(|e| e.is_info()).count(),
            debug_count: events.iter().filter(|e| e.is_debug()).count(),
            critical_count: events
                .iter()
                .filter(|e| e.is_error() && e.requires_halt())
                .count(),
        }
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.events();

        let max_events = crate::config::compile_time::logging::MAX_ERROR_COLLECTION;
        if events.len() >= max_events {
            let remove_count = events.len() - max_events + 1;
            events.drain(0..remove_count);
        }

        events.push(event.clone());
    }
}

/// Counts of events held by a `MemoryLogger`
#[derive(Debug, Clone)]
pub struct EventSummary {
    pub total_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub debug_count: usize,
    pub critical_count: usize,
}

impl EventSummary {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    pub fn has_critical_errors(&self) -> bool {
        self.critical_count > 0
    }
}

/// Fan-out logger; with no targets it discards everything
pub struct MultiLogger {
    loggers: Vec<Arc<dyn Logger>>,
    min_level: LogLevel,
}

impl MultiLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            loggers: Vec::new(),
            min_level,
        }
    }

    pub fn add_logger(&mut self, logger: Arc<dyn Logger>) {
        self.loggers.push(logger);
    }

    pub fn with_memory(mut self) -> (Self, Arc<MemoryLogger>) {
        let memory_logger = Arc::new(MemoryLogger::new());
        self.add_logger(memory_logger.clone());
        (self, memory_logger)
    }
}

impl Logger for MultiLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            for logger in &self.loggers {
                logger.log(event);
            }
        }
    }
}

/// Create logging service based on current configuration
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}
