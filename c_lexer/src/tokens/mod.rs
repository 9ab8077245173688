//! Token types shared by the scanner, the symbol table builder and the report
//!
//! A [`Token`] pairs a [`TokenCategory`] with the matched lexeme and its
//! [`Span`](crate::utils::Span). The scanner emits tokens into a
//! [`TokenStream`] in source order; suppressed categories (comments, `@`
//! markers, whitespace and line breaks) never reach the stream.

pub mod token;
pub mod token_stream;

pub use token::{Token, TokenCategory, TokenClass};
pub use token_stream::TokenStream;
