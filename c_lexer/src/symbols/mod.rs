//! Symbol table construction
//!
//! Two structures come out of a run. The [`SymbolTable`] holds every distinct
//! `(lexeme, classification)` pair in first-occurrence order and feeds the
//! report. The [`PlainIdentifierRegistry`] is filled by the scanner with the
//! identifiers that survived keyword reclassification and backs the
//! unique-identifier count.

use crate::config::runtime::SymbolPreferences;
use crate::logging::codes;
use crate::tokens::TokenStream;
use crate::{log_debug, log_error, log_success};

pub mod error;
pub mod registry;
pub mod table;

pub use error::{SymbolError, SymbolResult};
pub use registry::{IdentifierRecord, PlainIdentifierRegistry, GLOBAL_SCOPE};
pub use table::{Classification, SymbolEntry, SymbolTable, SymbolTableBuilder};

/// Build the symbol table with default preferences
pub fn build_symbol_table(tokens: &TokenStream) -> SymbolResult<SymbolTable> {
    build_symbol_table_with_preferences(tokens, SymbolPreferences::default())
}

pub fn build_symbol_table_with_preferences(
    tokens: &TokenStream,
    preferences: SymbolPreferences,
) -> SymbolResult<SymbolTable> {
    log_debug!("Building symbol table", "tokens" => tokens.len());

    let mut builder = SymbolTableBuilder::with_preferences(preferences);
    if let Err(error) = builder.extend(tokens) {
        log_error!(error.error_code(), &error.to_string());
        return Err(error);
    }

    let truncated = builder.is_truncated();
    let table = builder.build();

    log_success!(codes::success::SYMBOL_TABLE_COMPLETE,
        "Symbol table built",
        "unique_symbols" => table.len(),
        "truncated" => truncated
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{Token, TokenCategory};
    use crate::utils::Span;

    #[test]
    fn test_build_from_stream() {
        let tokens = TokenStream::new(vec![
            Token::new(TokenCategory::Keyword, "return", Span::dummy()),
            Token::new(TokenCategory::Constant, "0", Span::dummy()),
            Token::new(TokenCategory::Separator, ";", Span::dummy()),
        ]);

        let table = build_symbol_table(&tokens).unwrap();
        assert_eq!(
            table.pairs(),
            vec![("return", "Keyword"), ("0", "Constant"), (";", "Separator")]
        );
    }

    #[test]
    fn test_empty_stream_builds_empty_table() {
        let table = build_symbol_table(&TokenStream::default()).unwrap();
        assert!(table.is_empty());
    }
}
