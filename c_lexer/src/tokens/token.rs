//! Token categories and classified tokens
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical category of a token, in rule-table priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenCategory {
    Comment,
    Preprocessor,
    AtSymbol,
    Datatype,
    Keyword,
    Id,
    Constant,
    StringLiteral,
    CharLiteral,
    IncrementOp,
    DecrementOp,
    AssignOp,
    ArithmeticOp,
    RelationalOp,
    RoundBracket,
    CurlyBracket,
    Separator,
    Whitespace,
    Newline,
}

/// Coarse grouping used for metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Word,
    Literal,
    Operator,
    Punctuation,
    Directive,
    Trivia,
}

impl TokenCategory {
    /// Every category in rule-table priority order
    pub const ALL: [TokenCategory; 19] = [
        TokenCategory::Comment,
        TokenCategory::Preprocessor,
        TokenCategory::AtSymbol,
        TokenCategory::Datatype,
        TokenCategory::Keyword,
        TokenCategory::Id,
        TokenCategory::Constant,
        TokenCategory::StringLiteral,
        TokenCategory::CharLiteral,
        TokenCategory::IncrementOp,
        TokenCategory::DecrementOp,
        TokenCategory::AssignOp,
        TokenCategory::ArithmeticOp,
        TokenCategory::RelationalOp,
        TokenCategory::RoundBracket,
        TokenCategory::CurlyBracket,
        TokenCategory::Separator,
        TokenCategory::Whitespace,
        TokenCategory::Newline,
    ];

    /// Name printed in the "tokens found" listing
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Comment => "COMMENT",
            Self::Preprocessor => "PREPROCESSOR",
            Self::AtSymbol => "AT_SYMBOL",
            Self::Datatype => "DATATYPE",
            Self::Keyword => "KEYWORD",
            Self::Id => "ID",
            Self::Constant => "CONSTANT",
            Self::StringLiteral => "STRING_LITERAL",
            Self::CharLiteral => "CHAR_LITERAL",
            Self::IncrementOp => "INCREMENT_OP",
            Self::DecrementOp => "DECREMENT_OP",
            Self::AssignOp => "ASSIGN_OP",
            Self::ArithmeticOp => "ARITHMETIC_OP",
            Self::RelationalOp => "RELATIONAL_OP",
            Self::RoundBracket => "ROUND_BRACKET",
            Self::CurlyBracket => "CURLY_BRACKET",
            Self::Separator => "SEPARATOR",
            Self::Whitespace => "WHITESPACE",
            Self::Newline => "NEWLINE",
        }
    }

    /// Consumed by the scanner and never emitted as tokens
    pub fn is_suppressed(&self) -> bool {
        matches!(
            self,
            Self::Comment | Self::AtSymbol | Self::Whitespace | Self::Newline
        )
    }

    pub fn token_class(&self) -> TokenClass {
        match self {
            Self::Datatype | Self::Keyword | Self::Id => TokenClass::Word,
            Self::Constant | Self::StringLiteral | Self::CharLiteral => TokenClass::Literal,
            Self::IncrementOp
            | Self::DecrementOp
            | Self::AssignOp
            | Self::ArithmeticOp
            | Self::RelationalOp => TokenClass::Operator,
            Self::RoundBracket | Self::CurlyBracket | Self::Separator => TokenClass::Punctuation,
            Self::Preprocessor => TokenClass::Directive,
            Self::Comment | Self::AtSymbol | Self::Whitespace | Self::Newline => {
                TokenClass::Trivia
            }
        }
    }

    pub fn is_operator(&self) -> bool {
        self.token_class() == TokenClass::Operator
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lexeme with its source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub category: TokenCategory,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(category: TokenCategory, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            category,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn is(&self, category: TokenCategory) -> bool {
        self.category == category
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.category, self.lexeme, self.span.start)
    }
}
