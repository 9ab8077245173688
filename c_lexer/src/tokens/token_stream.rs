//! Ordered token sequence produced by the scanner
use super::token::{Token, TokenCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Non-suppressed tokens in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Token count per category, ordered by category priority
    pub fn count_by_category(&self) -> BTreeMap<TokenCategory, usize> {
        let mut counts = BTreeMap::new();
        for token in &self.tokens {
            *counts.entry(token.category).or_insert(0) += 1;
        }
        counts
    }

    /// `(category, lexeme)` pairs, the shape used when comparing runs
    pub fn pairs(&self) -> Vec<(TokenCategory, &str)> {
        self.tokens
            .iter()
            .map(|t| (t.category, t.lexeme.as_str()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Span;

    fn token(category: TokenCategory, lexeme: &str) -> Token {
        Token::new(category, lexeme, Span::dummy())
    }

    #[test]
    fn test_counts_and_pairs() {
        let stream = TokenStream::new(vec![
            token(TokenCategory::Id, "a"),
            token(TokenCategory::AssignOp, "="),
            token(TokenCategory::Id, "b"),
        ]);

        let counts = stream.count_by_category();
        assert_eq!(counts.get(&TokenCategory::Id), Some(&2));
        assert_eq!(counts.get(&TokenCategory::AssignOp), Some(&1));
        assert_eq!(
            stream.pairs(),
            vec![
                (TokenCategory::Id, "a"),
                (TokenCategory::AssignOp, "="),
                (TokenCategory::Id, "b"),
            ]
        );
    }

    #[test]
    fn test_empty_stream() {
        let stream = TokenStream::default();
        assert!(stream.is_empty());
        assert_eq!(stream.len(), 0);
        assert!(stream.count_by_category().is_empty());
    }
}
