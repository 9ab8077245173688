//! Shared primitive types used across the lexer stages

pub mod span;

pub use span::{Position, SourceMap, Span};
