//! Rule table: the ordered `(category, pattern)` list and its compiled alternation

use super::analyzer::LexerError;
use crate::tokens::TokenCategory;
use regex::{Captures, Match, Regex};
use std::sync::OnceLock;

/// One recognizable lexeme shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub category: TokenCategory,
    pub pattern: &'static str,
}

const fn rule(category: TokenCategory, pattern: &'static str) -> Rule {
    Rule { category, pattern }
}

/// Built-in type names, reclassified to `DATATYPE`
pub const DATATYPE_NAMES: [&str; 5] = ["int", "float", "char", "double", "void"];

/// Reserved words, reclassified to `KEYWORD`
pub const RESERVED_WORDS: [&str; 16] = [
    "if", "else", "while", "for", "do", "switch", "case", "default", "break", "continue",
    "return", "printf", "scanf", "main", "include", "define",
];

/// Rules in matching priority order. Earlier rules win at the same start position.
pub const RULES: [Rule; 19] = [
    rule(TokenCategory::Comment, r"//.*|/\*.*?\*/"),
    rule(TokenCategory::Preprocessor, r"#\s*include\s*<[^>]+>"),
    rule(TokenCategory::AtSymbol, r"@"),
    rule(TokenCategory::Datatype, r"\b(int|float|char|double|void)\b"),
    rule(
        TokenCategory::Keyword,
        r"\b(if|else|while|for|do|switch|case|default|break|continue|return|printf|scanf|main|include|define)\b",
    ),
    rule(TokenCategory::Id, r"\b[a-zA-Z_][a-zA-Z0-9_]*\b"),
    rule(TokenCategory::Constant, r"\b\d+(\.\d+)?\b"),
    rule(TokenCategory::StringLiteral, r#""[^"]*""#),
    rule(TokenCategory::CharLiteral, r"'[^']*'"),
    rule(TokenCategory::IncrementOp, r"\+\+"),
    rule(TokenCategory::DecrementOp, r"--"),
    rule(TokenCategory::AssignOp, r"="),
    rule(TokenCategory::ArithmeticOp, r"[+\-*/]"),
    rule(TokenCategory::RelationalOp, r"(>=|<=|==|!=|>|<)"),
    rule(TokenCategory::RoundBracket, r"[()]"),
    rule(TokenCategory::CurlyBracket, r"[{}]"),
    rule(TokenCategory::Separator, r"[;,:]"),
    rule(TokenCategory::Whitespace, r"[ \t]+"),
    rule(TokenCategory::Newline, r"\n"),
];

static COMPILED_RULES: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// Single alternation of named groups, one per rule, in priority order
pub fn combined_pattern() -> String {
    RULES
        .iter()
        .map(|r| format!("(?P<{}>{})", r.category.as_str(), r.pattern))
        .collect::<Vec<_>>()
        .join("|")
}

/// The compiled rule table, built once per process
pub fn compiled_rules() -> Result<&'static Regex, LexerError> {
    COMPILED_RULES
        .get_or_init(|| Regex::new(&combined_pattern()))
        .as_ref()
        .map_err(|e| LexerError::RuleCompilation {
            message: e.to_string(),
        })
}

/// The rule that produced a match of the combined alternation
pub fn matched_rule<'h>(captures: &Captures<'h>) -> Option<(TokenCategory, Match<'h>)> {
    RULES.iter().find_map(|r| {
        captures
            .name(r.category.as_str())
            .map(|m| (r.category, m))
    })
}

/// Post-match reclassification of an identifier-shaped lexeme
pub fn classify_word(lexeme: &str) -> TokenCategory {
    if DATATYPE_NAMES.contains(&lexeme) {
        TokenCategory::Datatype
    } else if RESERVED_WORDS.contains(&lexeme) {
        TokenCategory::Keyword
    } else {
        TokenCategory::Id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_follow_category_priority() {
        let categories: Vec<TokenCategory> = RULES.iter().map(|r| r.category).collect();
        assert_eq!(categories, TokenCategory::ALL.to_vec());
    }

    #[test]
    fn test_rules_compile() {
        let regex = compiled_rules().unwrap();
        for category in TokenCategory::ALL {
            assert!(regex
                .capture_names()
                .flatten()
                .any(|name| name == category.as_str()));
        }
    }

    #[test]
    fn test_word_lists_agree_with_patterns() {
        for name in DATATYPE_NAMES {
            assert!(RULES[3].pattern.contains(name));
            assert_eq!(classify_word(name), TokenCategory::Datatype);
        }
        for word in RESERVED_WORDS {
            assert!(RULES[4].pattern.contains(word));
            assert_eq!(classify_word(word), TokenCategory::Keyword);
        }
        assert_eq!(classify_word("integer"), TokenCategory::Id);
        assert_eq!(classify_word("_tmp"), TokenCategory::Id);
    }

    #[test]
    fn test_earlier_alternative_wins() {
        let regex = compiled_rules().unwrap();

        let caps = regex.captures("++x").unwrap();
        let (category, m) = matched_rule(&caps).unwrap();
        assert_eq!(category, TokenCategory::IncrementOp);
        assert_eq!(m.as_str(), "++");

        let caps = regex.captures("==").unwrap();
        let (category, m) = matched_rule(&caps).unwrap();
        assert_eq!(category, TokenCategory::AssignOp);
        assert_eq!(m.as_str(), "=");

        let caps = regex.captures("<= 3").unwrap();
        let (category, m) = matched_rule(&caps).unwrap();
        assert_eq!(category, TokenCategory::RelationalOp);
        assert_eq!(m.as_str(), "<=");
    }

    #[test]
    fn test_block_comment_is_single_line() {
        let regex = compiled_rules().unwrap();
        let caps = regex.captures("/* a */ b").unwrap();
        let (category, m) = matched_rule(&caps).unwrap();
        assert_eq!(category, TokenCategory::Comment);
        assert_eq!(m.as_str(), "/* a */");

        let caps = regex.captures("/* a\n*/").unwrap();
        let (category, _) = matched_rule(&caps).unwrap();
        assert_ne!(category, TokenCategory::Comment);
    }
}
