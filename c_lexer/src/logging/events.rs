//! Log events produced by the analyzer

use super::codes::{self, Code};
use crate::utils::Span;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
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
}

/// Core log event structure
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub span: Option<Span>,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.to_string(),
            span: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(error_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, error_code, message)
    }

    /// Warning without a registered code
    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, Code::new("W000"), message)
    }

    pub fn warning_with_code(warning_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Warning, warning_code, message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, Code::new("I000"), message)
    }

    /// Info event carrying a success code
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, success_code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, Code::new("D000"), message)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_file_path(self, path: &str) -> Self {
        self.with_context("file_path", path)
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn is_debug(&self) -> bool {
        self.level == LogLevel::Debug
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.code.as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.code.as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.code.as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.code.as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.code.as_str())
    }

    /// Single-line display form: `[LEVEL] CODE - message at line:col`
    pub fn format(&self) -> String {
        let span_str = self
            .span
            .as_ref()
            .map(|s| format!(" at {}:{}", s.start().line, s.start().column))
            .unwrap_or_default();

        format!(
            "[{}] {} - {}{}",
            self.level.as_str(),
            self.code.as_str(),
            self.message,
            span_str
        )
    }

    /// Multi-line form with registry metadata and context
    pub fn format_detailed(&self) -> String {
        let mut output = self.format();

        output.push_str(&format!("\n  Category: {}", self.category()));
        output.push_str(&format!("\n  Severity: {}", self.severity()));

        if self.is_error() {
            output.push_str(&format!("\n  Recoverable: {}", self.is_recoverable()));
            output.push_str(&format!("\n  Requires halt: {}", self.requires_halt()));
        }

        if let Some(metadata) = codes::get_error_metadata(self.code.as_str()) {
            output.push_str(&format!("\n  Description: {}", metadata.description));
            output.push_str(&format!(
                "\n  Recommended action: {}",
                metadata.recommended_action
            ));
        }

        if !self.context.is_empty() {
            output.push_str("\n  Context:");
            for (key, value) in &self.context {
                output.push_str(&format!("\n    {}: {}", key, value));
            }
        }

        output
    }

    /// Format as a JSON line for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
            "category": self.category(),
            "severity": self.severity(),
        });

        if self.is_error() {
            json["error_metadata"] = serde_json::json!({
                "recoverable": self.is_recoverable(),
                "requires_halt": self.requires_halt(),
                "description": self.description(),
                "recommended_action": self.recommended_action(),
            });
        }

        if let Some(span) = &self.span {
            json["span"] = serde_json::json!({
                "start_line": span.start().line,
                "start_column": span.start().column,
                "end_line": span.end().line,
                "end_column": span.end().column,
            });
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::Value::Object(
                self.context
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            );
        }

        serde_json::to_string(&json)
    }
}
