// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Read a boolean or numeric preference from the environment, falling back to `default`
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to rewrite `\r\n` to `\n` before scanning
    pub normalize_line_endings: bool,

    /// Whether to enable detailed performance logging (user preference)
    pub enable_performance_logging: bool,

    /// Whether to log a warning when a file crosses the large-file threshold
    pub warn_on_large_files: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            normalize_line_endings: env_or(env_vars::NORMALIZE_LINE_ENDINGS, true),
            enable_performance_logging: env_or(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
            warn_on_large_files: env_or(env_vars::WARN_ON_LARGE_FILES, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to collect per-category token metrics
    pub collect_detailed_metrics: bool,

    /// Whether lexical gaps are logged as warnings (they are always recorded)
    pub warn_on_unmatched: bool,

    /// Whether to show position information in error messages
    pub include_position_in_errors: bool,

    /// Whether to track operator usage patterns
    pub track_operator_patterns: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_or(env_vars::LEXICAL_DETAILED_METRICS, true),
            warn_on_unmatched: env_or(env_vars::LEXICAL_WARN_ON_UNMATCHED, true),
            include_position_in_errors: env_or(env_vars::LEXICAL_INCLUDE_POSITIONS, true),
            track_operator_patterns: env_or(env_vars::LEXICAL_TRACK_OPERATORS, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolPreferences {
    /// Whether to fail the run when the entry limit is exceeded
    pub enforce_entry_limit: bool,

    /// Whether to log each newly registered plain identifier at debug level
    pub log_new_identifiers: bool,
}

impl Default for SymbolPreferences {
    fn default() -> Self {
        Self {
            enforce_entry_limit: env_or(env_vars::SYMBOLS_ENFORCE_LIMIT, true),
            log_new_identifiers: env_or(env_vars::SYMBOLS_LOG_NEW_IDENTIFIERS, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPreferences {
    /// Optional path for a JSON summary written next to the text report
    pub json_summary_path: Option<String>,

    /// Whether a report is still written when the input produced no tokens
    pub write_report_without_tokens: bool,
}

impl Default for ReportPreferences {
    fn default() -> Self {
        Self {
            json_summary_path: env::var(env_vars::REPORT_JSON_SUMMARY)
                .ok()
                .filter(|v| !v.trim().is_empty()),
            write_report_without_tokens: env_or(env_vars::REPORT_WRITE_WITHOUT_TOKENS, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level (within security constraints)
    pub min_log_level: LogLevel,

    /// Whether to include performance metrics in logs
    pub log_performance_events: bool,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_or(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_or(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env_or(env_vars::LOGGING_LOG_PERFORMANCE, true),
            enable_cargo_style_output: env_or(env_vars::LOGGING_CARGO_STYLE, true),
            include_file_context: env_or(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Errors raised while loading a preferences file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read preferences file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid preferences in '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub symbols: SymbolPreferences,
    pub report: ReportPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML text. Missing sections and keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load preferences from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load from the file named by `CLEX_CONFIG`, or fall back to environment defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(env_vars::CONFIG_FILE) {
            Ok(path) if !path.trim().is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const CONFIG_FILE: &str = "CLEX_CONFIG";

    // File Processor
    pub const NORMALIZE_LINE_ENDINGS: &str = "CLEX_NORMALIZE_LINE_ENDINGS";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "CLEX_ENABLE_PERFORMANCE_LOGGING";
    pub const WARN_ON_LARGE_FILES: &str = "CLEX_WARN_ON_LARGE_FILES";

    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "CLEX_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_WARN_ON_UNMATCHED: &str = "CLEX_LEXICAL_WARN_ON_UNMATCHED";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "CLEX_LEXICAL_INCLUDE_POSITIONS";
    pub const LEXICAL_TRACK_OPERATORS: &str = "CLEX_LEXICAL_TRACK_OPERATORS";

    // Symbols
    pub const SYMBOLS_ENFORCE_LIMIT: &str = "CLEX_SYMBOLS_ENFORCE_LIMIT";
    pub const SYMBOLS_LOG_NEW_IDENTIFIERS: &str = "CLEX_SYMBOLS_LOG_NEW_IDENTIFIERS";

    // Report
    pub const REPORT_JSON_SUMMARY: &str = "CLEX_JSON_SUMMARY";
    pub const REPORT_WRITE_WITHOUT_TOKENS: &str = "CLEX_REPORT_WRITE_WITHOUT_TOKENS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "CLEX_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "CLEX_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "CLEX_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "CLEX_LOGGING_LOG_PERFORMANCE";
    pub const LOGGING_CARGO_STYLE: &str = "CLEX_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "CLEX_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [lexical]
            warn_on_unmatched = false

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert!(!config.lexical.warn_on_unmatched);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert_eq!(
            config.symbols.enforce_entry_limit,
            SymbolPreferences::default().enforce_entry_limit
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[file_processor]\nnormalize_line_endings = false").unwrap();

        let config = RuntimeConfig::load(file.path()).unwrap();
        assert!(!config.file_processor.normalize_line_endings);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[lexical]\nwarn_on_unmatched = \"sometimes\"").unwrap();

        let result = RuntimeConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = RuntimeConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
