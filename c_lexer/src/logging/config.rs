//! Logging configuration: compile-time bounds plus runtime preferences
//!
//! Compile-time limits come from the build profile and cannot be changed at runtime.
//! User preferences may only make logging more verbose than the security floor.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences; only the first call takes effect
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Level that is always logged regardless of user preference
pub fn get_security_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        _ => EventsLogLevel::Info,
    }
}

/// Most verbose level currently emitted
pub fn get_min_log_level() -> EventsLogLevel {
    let user_level = get_runtime_preferences().min_log_level.to_events_log_level();
    user_level.max(get_security_log_level())
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

pub fn log_performance_events() -> bool {
    get_runtime_preferences().log_performance_events
}

pub fn use_cargo_style_output() -> bool {
    get_runtime_preferences().enable_cargo_style_output
}

pub fn include_file_context() -> bool {
    get_runtime_preferences().include_file_context
}

pub fn get_max_log_events_per_file() -> usize {
    MAX_LOG_EVENTS_PER_FILE
}

/// Clip a message to `MAX_LOG_MESSAGE_LENGTH` bytes on a char boundary
pub fn truncate_message(message: &str) -> String {
    if message.len() <= MAX_LOG_MESSAGE_LENGTH {
        return message.to_string();
    }
    let mut end = MAX_LOG_MESSAGE_LENGTH;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &message[..end])
}

/// Validate compile-time logging bounds
pub fn validate_config() -> Result<(), String> {
    if MAX_ERROR_COLLECTION == 0 {
        return Err("Error collection size must be non-zero".to_string());
    }

    if MAX_LOG_EVENTS_PER_FILE > MAX_ERROR_COLLECTION {
        return Err("Max log events per file exceeds total collection size".to_string());
    }

    if MAX_LOG_MESSAGE_LENGTH < 64 {
        return Err(format!(
            "Max log message length too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    Ok(())
}

pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration:\n\
         === Compile-time Limits ({}) ===\n\
         - Max collected events: {}\n\
         - Max events per file: {}\n\
         - Max message length: {}\n\
         - Security min level: {}\n\
         === User Preferences (Runtime) ===\n\
         - Min log level: {:?}\n\
         - Structured logging: {}\n\
         - Console logging: {}\n\
         - Performance events: {}\n\
         - Cargo-style output: {}\n\
         - Include file context: {}",
        crate::config::build_info::source_info(),
        MAX_ERROR_COLLECTION,
        MAX_LOG_EVENTS_PER_FILE,
        MAX_LOG_MESSAGE_LENGTH,
        SECURITY_MIN_LOG_LEVEL,
        preferences.min_log_level,
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        preferences.log_performance_events,
        preferences.enable_cargo_style_output,
        preferences.include_file_context,
    )
}
