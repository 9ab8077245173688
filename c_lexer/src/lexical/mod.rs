//! Lexical analysis
//!
//! [`rules`] holds the ordered rule table; [`analyzer`] runs it over a
//! source text and produces a [`TokenStream`] together with the
//! [`AnalysisRun`] state (identifier registry, metrics, diagnostics).

pub mod analyzer;
pub mod rules;

use crate::config::compile_time::lexical::*;
use crate::tokens::TokenStream;

pub use analyzer::{AnalysisRun, LexerError, LexicalAnalyzer, LexicalDiagnostic, LexicalMetrics};
pub use rules::{Rule, DATATYPE_NAMES, RESERVED_WORDS, RULES};

/// Tokenize a source text with default preferences, returning the run state alongside
pub fn tokenize(source: &str) -> Result<(TokenStream, AnalysisRun), LexerError> {
    let mut analyzer = LexicalAnalyzer::new();
    let tokens = analyzer.tokenize(source)?;
    Ok((tokens, analyzer.into_run()))
}

/// Startup check that the rule table compiles and every lexical code is registered
pub fn validate_tokenization() -> Result<(), String> {
    let lexical_codes = [
        crate::logging::codes::lexical::UNMATCHED_INPUT,
        crate::logging::codes::lexical::IDENTIFIER_TOO_LONG,
        crate::logging::codes::lexical::STRING_TOO_LARGE,
        crate::logging::codes::lexical::COMMENT_TOO_LONG,
        crate::logging::codes::lexical::TOO_MANY_TOKENS,
        crate::logging::codes::lexical::RULE_COMPILATION_FAILED,
    ];

    for code in &lexical_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if MAX_TOKEN_COUNT == 0 {
        return Err("MAX_TOKEN_COUNT cannot be zero".to_string());
    }
    if MAX_IDENTIFIER_LENGTH == 0 {
        return Err("MAX_IDENTIFIER_LENGTH cannot be zero".to_string());
    }

    rules::compiled_rules()
        .map(|_| ())
        .map_err(|e| e.to_string())?;

    crate::log_debug!("Lexical limits validated",
        "max_token_count" => MAX_TOKEN_COUNT,
        "max_identifier_length" => MAX_IDENTIFIER_LENGTH,
        "max_string_size" => MAX_STRING_SIZE,
        "max_comment_length" => MAX_COMMENT_LENGTH
    );

    Ok(())
}
