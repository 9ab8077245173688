//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! Code constants and their behavioral metadata live side by side.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Lexical analysis codes
pub mod lexical {
    use super::Code;

    /// Text that no rule matched; skipped with a warning
    pub const UNMATCHED_INPUT: Code = Code::new("W020");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const STRING_TOO_LARGE: Code = Code::new("E024");
    pub const COMMENT_TOO_LONG: Code = Code::new("E026");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
    pub const RULE_COMPILATION_FAILED: Code = Code::new("E029");
}

/// Symbol table codes
pub mod symbols {
    use super::Code;

    pub const SYMBOL_LIMIT_EXCEEDED: Code = Code::new("E030");
    pub const IDENTIFIER_LIMIT_EXCEEDED: Code = Code::new("E031");
}

/// Report output codes
pub mod report {
    use super::Code;

    pub const REPORT_WRITE_FAILED: Code = Code::new("E040");
    pub const SUMMARY_SERIALIZATION_FAILED: Code = Code::new("E041");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const SYMBOL_TABLE_COMPLETE: Code = Code::new("I030");
    pub const REPORT_WRITTEN: Code = Code::new("I040");
    pub const ANALYSIS_COMPLETE: Code = Code::new("I050");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn register(registry: &mut HashMap<&'static str, ErrorMetadata>, metadata: ErrorMetadata) {
    registry.insert(metadata.code, metadata);
}

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal error",
                "File a bug report with the input that triggered it",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "Initialization failure",
                "Check the preferences file and environment variables",
            ),
        );

        // File processing errors
        register(
            &mut registry,
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Input file not found",
                "Check the input path",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Input file exceeds the configured size limit",
                "Split the input or build with a larger max_file_size",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "Input file contains no code",
                "Provide a file with source text",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Permission denied reading input",
                "Check file permissions",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Input is not valid UTF-8",
                "Re-encode the input as UTF-8",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "I/O error while reading input",
                "Retry once the underlying storage problem is fixed",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Input path is not a regular file",
                "Pass a path to a text file",
            ),
        );

        // Lexical
        register(
            &mut registry,
            ErrorMetadata::new(
                "W020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Input text not matched by any rule was skipped",
                "Remove or rewrite characters outside the supported C subset",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E023",
                "Lexical",
                Severity::High,
                false,
                true,
                "Identifier exceeds the maximum length",
                "Shorten the identifier",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E024",
                "Lexical",
                Severity::High,
                false,
                true,
                "String literal exceeds the maximum size",
                "Shorten the string literal",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E026",
                "Lexical",
                Severity::High,
                false,
                true,
                "Comment exceeds the maximum length",
                "Shorten the comment",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E027",
                "Lexical",
                Severity::Critical,
                false,
                true,
                "Token count exceeds the configured limit",
                "Split the input into smaller files",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E029",
                "Lexical",
                Severity::Critical,
                false,
                true,
                "Token rule table failed to compile",
                "File a bug report",
            ),
        );

        // Symbols
        register(
            &mut registry,
            ErrorMetadata::new(
                "E030",
                "Symbols",
                Severity::High,
                false,
                true,
                "Symbol table entry limit exceeded",
                "Split the input or build with a larger max_symbol_entries",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E031",
                "Symbols",
                Severity::High,
                false,
                true,
                "Plain identifier registry limit exceeded",
                "Split the input or build with a larger max_plain_identifiers",
            ),
        );

        // Report
        register(
            &mut registry,
            ErrorMetadata::new(
                "E040",
                "Report",
                Severity::High,
                false,
                true,
                "Report could not be written",
                "Check the output path and its directory permissions",
            ),
        );
        register(
            &mut registry,
            ErrorMetadata::new(
                "E041",
                "Report",
                Severity::Medium,
                true,
                false,
                "JSON summary could not be produced",
                "Check the CLEX_JSON_SUMMARY path",
            ),
        );

        // Success codes
        for (code, description) in [
            ("I001", "Operation completed successfully"),
            ("I004", "System initialization completed"),
            ("I006", "File processing completed"),
            ("I020", "Tokenization completed"),
            ("I030", "Symbol table built"),
            ("I040", "Report written"),
            ("I050", "Analysis completed"),
        ] {
            register(
                &mut registry,
                ErrorMetadata::new(
                    code,
                    "Success",
                    Severity::Low,
                    true,
                    false,
                    description,
                    "None",
                ),
            );
        }

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_code_is_registered() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            file_processing::FILE_NOT_FOUND,
            file_processing::FILE_TOO_LARGE,
            file_processing::EMPTY_FILE,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            file_processing::INVALID_PATH,
            lexical::UNMATCHED_INPUT,
            lexical::IDENTIFIER_TOO_LONG,
            lexical::STRING_TOO_LARGE,
            lexical::COMMENT_TOO_LONG,
            lexical::TOO_MANY_TOKENS,
            lexical::RULE_COMPILATION_FAILED,
            symbols::SYMBOL_LIMIT_EXCEEDED,
            symbols::IDENTIFIER_LIMIT_EXCEEDED,
            report::REPORT_WRITE_FAILED,
            report::SUMMARY_SERIALIZATION_FAILED,
            success::OPERATION_COMPLETED_SUCCESSFULLY,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::FILE_PROCESSING_SUCCESS,
            success::TOKENIZATION_COMPLETE,
            success::SYMBOL_TABLE_COMPLETE,
            success::REPORT_WRITTEN,
            success::ANALYSIS_COMPLETE,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "code {} has no metadata",
                code
            );
        }
    }

    #[test]
    fn test_unmatched_input_is_recoverable_warning() {
        let code = lexical::UNMATCHED_INPUT.as_str();
        assert!(is_recoverable(code));
        assert!(!requires_halt(code));
        assert_eq!(get_severity(code), Severity::Low);
        assert_eq!(get_category(code), "Lexical");
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_severity("X999"), Severity::Medium);
        assert!(is_recoverable("X999"));
        assert!(!requires_halt("X999"));
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_action("X999"), "No specific action available");
    }
}
