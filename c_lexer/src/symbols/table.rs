//! Report classifications and the deduplicated symbol table

use super::error::{SymbolError, SymbolResult};
use crate::config::compile_time::symbols::MAX_SYMBOL_ENTRIES;
use crate::config::runtime::SymbolPreferences;
use crate::logging::codes;
use crate::tokens::{TokenCategory, TokenStream};
use crate::utils::Span;
use crate::log_warning;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Classification shown in the symbol table section of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Datatype,
    #[serde(rename = "ID")]
    Id,
    #[serde(rename = "Assign_OP")]
    AssignOp,
    Constant,
    Separator,
    Keyword,
    #[serde(rename = "Round Bracket")]
    RoundBracket,
    #[serde(rename = "Curly Bracket")]
    CurlyBracket,
    #[serde(rename = "Increment Operator")]
    IncrementOperator,
    #[serde(rename = "Decrement Operator")]
    DecrementOperator,
    #[serde(rename = "Relational Operator")]
    RelationalOperator,
    #[serde(rename = "String Literal")]
    StringLiteral,
}

impl Classification {
    /// Report classification of a token category, if it has one.
    ///
    /// Categories without a classification still show up in the token listing
    /// but never become symbol table entries.
    pub fn for_category(category: TokenCategory) -> Option<Self> {
        match category {
            TokenCategory::Datatype => Some(Self::Datatype),
            TokenCategory::Id => Some(Self::Id),
            TokenCategory::AssignOp => Some(Self::AssignOp),
            TokenCategory::Constant => Some(Self::Constant),
            TokenCategory::Separator => Some(Self::Separator),
            TokenCategory::Keyword => Some(Self::Keyword),
            TokenCategory::RoundBracket => Some(Self::RoundBracket),
            TokenCategory::CurlyBracket => Some(Self::CurlyBracket),
            TokenCategory::IncrementOp => Some(Self::IncrementOperator),
            TokenCategory::DecrementOp => Some(Self::DecrementOperator),
            TokenCategory::RelationalOp => Some(Self::RelationalOperator),
            TokenCategory::StringLiteral => Some(Self::StringLiteral),
            TokenCategory::Preprocessor
            | TokenCategory::CharLiteral
            | TokenCategory::ArithmeticOp
            | TokenCategory::Comment
            | TokenCategory::AtSymbol
            | TokenCategory::Whitespace
            | TokenCategory::Newline => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Datatype => "Datatype",
            Self::Id => "ID",
            Self::AssignOp => "Assign_OP",
            Self::Constant => "Constant",
            Self::Separator => "Separator",
            Self::Keyword => "Keyword",
            Self::RoundBracket => "Round Bracket",
            Self::CurlyBracket => "Curly Bracket",
            Self::IncrementOperator => "Increment Operator",
            Self::DecrementOperator => "Decrement Operator",
            Self::RelationalOperator => "Relational Operator",
            Self::StringLiteral => "String Literal",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub name: String,
    pub classification: Classification,
    /// Location of the first occurrence
    pub first_seen: Span,
}

impl SymbolEntry {
    pub fn key(&self) -> (&str, Classification) {
        (self.name.as_str(), self.classification)
    }
}

/// Unique `(lexeme, classification)` entries in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    /// Total unique symbols
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SymbolEntry> {
        self.entries.iter()
    }

    pub fn contains(&self, name: &str, classification: Classification) -> bool {
        self.entries
            .iter()
            .any(|e| e.key() == (name, classification))
    }

    /// `(name, label)` pairs in table order
    pub fn pairs(&self) -> Vec<(&str, &'static str)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.classification.label()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a SymbolEntry;
    type IntoIter = std::slice::Iter<'a, SymbolEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Builds a [`SymbolTable`] from a token stream
pub struct SymbolTableBuilder {
    preferences: SymbolPreferences,
    seen: HashSet<(String, Classification)>,
    entries: Vec<SymbolEntry>,
    truncated: bool,
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        Self::with_preferences(SymbolPreferences::default())
    }

    pub fn with_preferences(preferences: SymbolPreferences) -> Self {
        Self {
            preferences,
            seen: HashSet::new(),
            entries: Vec::new(),
            truncated: false,
        }
    }

    /// Offer one candidate entry. Returns whether it was new.
    pub fn insert(
        &mut self,
        name: &str,
        classification: Classification,
        span: Span,
    ) -> SymbolResult<bool> {
        if self.seen.contains(&(name.to_string(), classification)) {
            return Ok(false);
        }

        if self.entries.len() >= MAX_SYMBOL_ENTRIES {
            if self.preferences.enforce_entry_limit {
                return Err(SymbolError::SymbolLimitExceeded {
                    lexeme: name.to_string(),
                });
            }
            if !self.truncated {
                self.truncated = true;
                log_warning!(code = codes::symbols::SYMBOL_LIMIT_EXCEEDED,
                    "Symbol table is full, further entries are dropped",
                    span = span,
                    "limit" => MAX_SYMBOL_ENTRIES
                );
            }
            return Ok(false);
        }

        self.seen.insert((name.to_string(), classification));
        self.entries.push(SymbolEntry {
            name: name.to_string(),
            classification,
            first_seen: span,
        });
        Ok(true)
    }

    /// Feed every token with a report classification
    pub fn extend(&mut self, tokens: &TokenStream) -> SymbolResult<()> {
        for token in tokens {
            if let Some(classification) = Classification::for_category(token.category) {
                self.insert(&token.lexeme, classification, token.span)?;
            }
        }
        Ok(())
    }

    /// Whether entries were dropped because the table was full
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn build(self) -> SymbolTable {
        SymbolTable {
            entries: self.entries,
        }
    }
}

impl Default for SymbolTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Token;

    fn stream(tokens: &[(TokenCategory, &str)]) -> TokenStream {
        TokenStream::new(
            tokens
                .iter()
                .map(|(c, l)| Token::new(*c, *l, Span::dummy()))
                .collect(),
        )
    }

    #[test]
    fn test_every_category_is_decided() {
        let classified: Vec<TokenCategory> = TokenCategory::ALL
            .into_iter()
            .filter(|c| Classification::for_category(*c).is_some())
            .collect();
        assert_eq!(classified.len(), 12);

        assert_eq!(Classification::for_category(TokenCategory::ArithmeticOp), None);
        assert_eq!(Classification::for_category(TokenCategory::CharLiteral), None);
        assert_eq!(Classification::for_category(TokenCategory::Preprocessor), None);
    }

    #[test]
    fn test_labels_match_serde_names() {
        for category in TokenCategory::ALL {
            if let Some(classification) = Classification::for_category(category) {
                let json = serde_json::to_string(&classification).unwrap();
                assert_eq!(json, format!("\"{}\"", classification.label()));
            }
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let tokens = stream(&[
            (TokenCategory::Datatype, "int"),
            (TokenCategory::Id, "a"),
            (TokenCategory::Separator, ";"),
            (TokenCategory::Datatype, "int"),
            (TokenCategory::Id, "a"),
            (TokenCategory::Separator, ";"),
        ]);

        let mut builder = SymbolTableBuilder::new();
        builder.extend(&tokens).unwrap();
        let table = builder.build();

        assert_eq!(
            table.pairs(),
            vec![("int", "Datatype"), ("a", "ID"), (";", "Separator")]
        );
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_same_text_different_classification_is_distinct() {
        let mut builder = SymbolTableBuilder::new();
        assert_eq!(builder.insert("x", Classification::Id, Span::dummy()), Ok(true));
        assert_eq!(
            builder.insert("x", Classification::Keyword, Span::dummy()),
            Ok(true)
        );
        assert_eq!(builder.insert("x", Classification::Id, Span::dummy()), Ok(false));

        let table = builder.build();
        assert!(table.contains("x", Classification::Id));
        assert!(table.contains("x", Classification::Keyword));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unclassified_tokens_are_skipped() {
        let tokens = stream(&[
            (TokenCategory::Id, "a"),
            (TokenCategory::ArithmeticOp, "+"),
            (TokenCategory::CharLiteral, "'c'"),
        ]);

        let mut builder = SymbolTableBuilder::new();
        builder.extend(&tokens).unwrap();
        assert_eq!(builder.build().pairs(), vec![("a", "ID")]);
    }
}
