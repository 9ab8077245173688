//! Rule-driven scanner
//!
//! Applies the compiled rule table to a source text, reclassifies
//! identifier-shaped matches, drops suppressed categories and records
//! every stretch of unmatched text as a diagnostic instead of aborting.

use super::rules;
use crate::config::compile_time::lexical::*;
use crate::config::runtime::{LexicalPreferences, SymbolPreferences};
use crate::file_processor::FileProcessingResult;
use crate::logging::codes::{self, Code, Severity};
use crate::symbols::{PlainIdentifierRegistry, SymbolError};
use crate::tokens::{Token, TokenCategory, TokenStream};
use crate::utils::{SourceMap, Span};
use crate::{log_debug, log_error, log_success, log_warning};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Lexical analysis errors with compile-time security boundaries
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Identifier too long: {length} characters (max {MAX_IDENTIFIER_LENGTH}) at {span}")]
    IdentifierTooLong { length: usize, span: Span },

    #[error("String too large: {size} bytes (max {MAX_STRING_SIZE}) at {span}")]
    StringTooLarge { size: usize, span: Span },

    #[error("Comment too long: {length} characters (max {MAX_COMMENT_LENGTH}) at {span}")]
    CommentTooLong { length: usize, span: Span },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("Rule table failed to compile: {message}")]
    RuleCompilation { message: String },

    #[error(transparent)]
    Registry(#[from] SymbolError),
}

impl LexerError {
    pub fn error_code(&self) -> Code {
        match self {
            LexerError::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
            LexerError::StringTooLarge { .. } => codes::lexical::STRING_TOO_LARGE,
            LexerError::CommentTooLong { .. } => codes::lexical::COMMENT_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
            LexerError::RuleCompilation { .. } => codes::lexical::RULE_COMPILATION_FAILED,
            LexerError::Registry(inner) => inner.error_code(),
        }
    }

    pub fn severity(&self) -> Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            LexerError::IdentifierTooLong { span, .. }
            | LexerError::StringTooLarge { span, .. }
            | LexerError::CommentTooLong { span, .. } => Some(*span),
            _ => None,
        }
    }
}

/// A stretch of source text no rule matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalDiagnostic {
    pub span: Span,
    pub text: String,
}

/// Lexical analysis metrics
#[derive(Debug, Default, Clone, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub datatype_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub operator_tokens: usize,
    pub literal_tokens: usize,
    pub suppressed_matches: usize,
    pub comment_count: usize,
    pub max_comment_length: usize,
    pub max_string_length: usize,
    pub gap_count: usize,
    pub invalid_chars: usize,

    // Populated only when detailed metrics / operator tracking are enabled
    pub category_counts: BTreeMap<TokenCategory, usize>,
    pub operator_usage_patterns: HashMap<String, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_match(
        &mut self,
        category: TokenCategory,
        lexeme: &str,
        preferences: &LexicalPreferences,
    ) {
        if preferences.collect_detailed_metrics {
            *self.category_counts.entry(category).or_insert(0) += 1;
        }

        if category.is_suppressed() {
            self.suppressed_matches += 1;
            if category == TokenCategory::Comment {
                self.comment_count += 1;
                self.max_comment_length = self.max_comment_length.max(lexeme.len());
            }
            return;
        }

        self.total_tokens += 1;
        match category {
            TokenCategory::Datatype => self.datatype_tokens += 1,
            TokenCategory::Keyword => self.keyword_tokens += 1,
            TokenCategory::Id => self.identifier_tokens += 1,
            TokenCategory::Constant | TokenCategory::CharLiteral => self.literal_tokens += 1,
            TokenCategory::StringLiteral => {
                self.literal_tokens += 1;
                self.max_string_length = self.max_string_length.max(lexeme.len());
            }
            c if c.is_operator() => {
                self.operator_tokens += 1;
                if preferences.track_operator_patterns {
                    *self
                        .operator_usage_patterns
                        .entry(lexeme.to_string())
                        .or_insert(0) += 1;
                }
            }
            _ => {}
        }
    }

    pub(crate) fn record_gap(&mut self, text: &str) {
        self.gap_count += 1;
        self.invalid_chars += text.chars().count();
    }
}

/// Mutable state of one analysis run
#[derive(Debug, Default, Clone)]
pub struct AnalysisRun {
    pub registry: PlainIdentifierRegistry,
    pub metrics: LexicalMetrics,
    pub diagnostics: Vec<LexicalDiagnostic>,
}

impl AnalysisRun {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Scanner over the compiled rule table
pub struct LexicalAnalyzer {
    preferences: LexicalPreferences,
    symbol_preferences: SymbolPreferences,
    run: AnalysisRun,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            preferences,
            symbol_preferences: SymbolPreferences::default(),
            run: AnalysisRun::new(),
        }
    }

    pub fn with_symbol_preferences(mut self, preferences: SymbolPreferences) -> Self {
        self.symbol_preferences = preferences;
        self
    }

    /// Tokenize the source held by a file processing result
    pub fn tokenize_file_result(
        &mut self,
        file_result: &FileProcessingResult,
    ) -> Result<TokenStream, LexerError> {
        log_debug!("Starting lexical analysis",
            "file" => file_result.metadata.path.display(),
            "char_count" => file_result.char_count(),
            "line_count" => file_result.metadata.line_count,
            "max_tokens_allowed" => MAX_TOKEN_COUNT
        );
        self.tokenize(&file_result.source)
    }

    /// Scan `source` from the start. Any state from a previous call is discarded.
    pub fn tokenize(&mut self, source: &str) -> Result<TokenStream, LexerError> {
        self.run = AnalysisRun::new();

        let regex = match rules::compiled_rules() {
            Ok(regex) => regex,
            Err(error) => {
                log_error!(error.error_code(), &error.to_string());
                return Err(error);
            }
        };

        let map = SourceMap::new(source);
        let mut tokens = TokenStream::default();
        let mut cursor = 0;

        for captures in regex.captures_iter(source) {
            let Some((category, m)) = rules::matched_rule(&captures) else {
                continue;
            };

            if m.start() > cursor {
                self.record_gap(&map, cursor, m.start());
            }
            cursor = m.end();

            let span = map.span(m.start(), m.end());
            let lexeme = m.as_str();

            if let Err(error) = self.check_limits(category, lexeme, span) {
                self.report_error(&error);
                return Err(error);
            }

            let category = if category == TokenCategory::Id {
                self.reclassify(lexeme, span)?
            } else {
                category
            };

            self.run.metrics.record_match(category, lexeme, &self.preferences);
            if category.is_suppressed() {
                continue;
            }

            if tokens.len() >= MAX_TOKEN_COUNT {
                let error = LexerError::TooManyTokens {
                    count: tokens.len() + 1,
                };
                self.report_error(&error);
                return Err(error);
            }
            tokens.push(Token::new(category, lexeme, span));
        }

        if cursor < source.len() {
            self.record_gap(&map, cursor, source.len());
        }

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed",
            "tokens" => tokens.len(),
            "identifiers" => self.run.registry.len(),
            "gaps" => self.run.metrics.gap_count
        );

        Ok(tokens)
    }

    /// Identifier-shaped match: datatype, keyword, or a plain identifier to register
    fn reclassify(&mut self, lexeme: &str, span: Span) -> Result<TokenCategory, LexerError> {
        let category = rules::classify_word(lexeme);
        if category != TokenCategory::Id {
            return Ok(category);
        }

        match self.run.registry.insert(lexeme, span.start.line) {
            Ok(true) if self.symbol_preferences.log_new_identifiers => {
                log_debug!("New identifier", "name" => lexeme, "line" => span.start.line);
            }
            Ok(_) => {}
            Err(error) => {
                let error = LexerError::from(error);
                self.report_error(&error);
                return Err(error);
            }
        }

        Ok(category)
    }

    fn check_limits(
        &self,
        category: TokenCategory,
        lexeme: &str,
        span: Span,
    ) -> Result<(), LexerError> {
        match category {
            TokenCategory::Datatype | TokenCategory::Keyword | TokenCategory::Id
                if lexeme.len() > MAX_IDENTIFIER_LENGTH =>
            {
                Err(LexerError::IdentifierTooLong {
                    length: lexeme.len(),
                    span,
                })
            }
            TokenCategory::StringLiteral if lexeme.len() > MAX_STRING_SIZE => {
                Err(LexerError::StringTooLarge {
                    size: lexeme.len(),
                    span,
                })
            }
            TokenCategory::Comment if lexeme.len() > MAX_COMMENT_LENGTH => {
                Err(LexerError::CommentTooLong {
                    length: lexeme.len(),
                    span,
                })
            }
            _ => Ok(()),
        }
    }

    fn record_gap(&mut self, map: &SourceMap<'_>, start: usize, end: usize) {
        let span = map.span(start, end);
        let text = map.span_text(&span);
        self.run.metrics.record_gap(text);

        if self.run.diagnostics.len() < MAX_REPORTED_GAPS {
            self.run.diagnostics.push(LexicalDiagnostic {
                span,
                text: text.to_string(),
            });

            if self.preferences.warn_on_unmatched {
                log_warning!(code = codes::lexical::UNMATCHED_INPUT,
                    "Skipping unmatched input",
                    span = span,
                    "text" => text.escape_debug()
                );
                log_debug!(&map.format_snippet(&span, "unmatched input"));
            }
        }
    }

    fn report_error(&self, error: &LexerError) {
        match error.span() {
            Some(span) if self.preferences.include_position_in_errors => {
                log_error!(error.error_code(), &error.to_string(), span = span);
            }
            _ => log_error!(error.error_code(), &error.to_string()),
        }
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.run.metrics
    }

    pub fn registry(&self) -> &PlainIdentifierRegistry {
        &self.run.registry
    }

    pub fn diagnostics(&self) -> &[LexicalDiagnostic] {
        &self.run.diagnostics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Hand over the state of the last run
    pub fn into_run(self) -> AnalysisRun {
        self.run
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn pairs(source: &str) -> Vec<(TokenCategory, String)> {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer
            .tokenize(source)
            .unwrap()
            .iter()
            .map(|t| (t.category, t.lexeme.clone()))
            .collect()
    }

    #[test]
    fn test_gap_is_skipped_and_recorded() {
        let mut analyzer = LexicalAnalyzer::new();
        let tokens = analyzer.tokenize("a $ b").unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(analyzer.diagnostics().len(), 1);
        assert_eq!(analyzer.diagnostics()[0].text, "$");
        assert_eq!(analyzer.diagnostics()[0].span.start.column, 3);
        assert_eq!(analyzer.metrics().invalid_chars, 1);
    }

    #[test]
    fn test_gap_span_renders_snippet() {
        let source = "int a;\nb $ c;";
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.tokenize(source).unwrap();

        let map = SourceMap::new(source);
        let gap = &analyzer.diagnostics()[0];
        assert_eq!(map.span_text(&gap.span), "$");

        let snippet = map.format_snippet(&gap.span, "unmatched input");
        assert!(snippet.contains("--> 2:3"));
        assert!(snippet.ends_with("  |   ^\n"));
    }

    #[test]
    fn test_adjacent_unmatched_chars_form_one_gap() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.tokenize("x $%& y").unwrap();

        assert_eq!(analyzer.metrics().gap_count, 1);
        assert_eq!(analyzer.metrics().invalid_chars, 3);
    }

    #[test]
    fn test_trailing_gap_is_recorded() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.tokenize("x;\r").unwrap();

        assert_eq!(analyzer.diagnostics().len(), 1);
        assert_eq!(analyzer.diagnostics()[0].text, "\r");
    }

    #[test]
    fn test_identifier_too_long() {
        let long = "a".repeat(MAX_IDENTIFIER_LENGTH + 1);
        let mut analyzer = LexicalAnalyzer::new();

        let err = analyzer.tokenize(&long).unwrap_err();
        assert_matches!(err, LexerError::IdentifierTooLong { length, .. } if length == MAX_IDENTIFIER_LENGTH + 1);
        assert_eq!(err.error_code(), codes::lexical::IDENTIFIER_TOO_LONG);
    }

    #[test]
    fn test_positions_are_one_based() {
        let mut analyzer = LexicalAnalyzer::new();
        let tokens = analyzer.tokenize("int a;\n  a = 1;").unwrap();

        let second_a = &tokens.tokens()[3];
        assert_eq!(second_a.lexeme, "a");
        assert_eq!(second_a.span.start.line, 2);
        assert_eq!(second_a.span.start.column, 3);
    }

    #[test]
    fn test_registry_records_first_line() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.tokenize("x = 1;\ny = x;").unwrap();

        let registry = analyzer.registry();
        assert_eq!(registry.names(), vec!["x", "y"]);
        assert_eq!(registry.lookup("x").unwrap().line, 1);
        assert_eq!(registry.lookup("y").unwrap().line, 2);
    }

    #[test]
    fn test_state_resets_between_runs() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.tokenize("alpha $").unwrap();
        analyzer.tokenize("beta").unwrap();

        assert_eq!(analyzer.registry().names(), vec!["beta"]);
        assert!(analyzer.diagnostics().is_empty());
    }

    #[test]
    fn test_metrics_count_categories() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer
            .tokenize("// note\nint x = \"hi\"; x++;")
            .unwrap();

        let metrics = analyzer.metrics();
        assert_eq!(metrics.total_tokens, 8);
        assert_eq!(metrics.datatype_tokens, 1);
        assert_eq!(metrics.identifier_tokens, 2);
        assert_eq!(metrics.comment_count, 1);
        assert_eq!(metrics.max_string_length, 4);
        assert_eq!(metrics.operator_tokens, 2);
    }

    #[test]
    fn test_operator_patterns_tracked_when_enabled() {
        let preferences = LexicalPreferences {
            track_operator_patterns: true,
            ..LexicalPreferences::default()
        };
        let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
        analyzer.tokenize("a = b + c + d;").unwrap();

        let patterns = &analyzer.metrics().operator_usage_patterns;
        assert_eq!(patterns.get("+"), Some(&2));
        assert_eq!(patterns.get("="), Some(&1));
    }

    #[test]
    fn test_preprocessor_and_char_literal() {
        assert_eq!(
            pairs("#include <stdio.h>\nchar c = 'x';"),
            vec![
                (TokenCategory::Preprocessor, "#include <stdio.h>".to_string()),
                (TokenCategory::Datatype, "char".to_string()),
                (TokenCategory::Id, "c".to_string()),
                (TokenCategory::AssignOp, "=".to_string()),
                (TokenCategory::CharLiteral, "'x'".to_string()),
                (TokenCategory::Separator, ";".to_string()),
            ]
        );
    }
}
