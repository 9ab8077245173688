//! Lexical analyzer for a C-like language
//!
//! Scans source text with a prioritized rule table, builds a deduplicated
//! symbol table from the token stream and renders a fixed-layout report.

pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod symbols;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use pipeline::{analyze_file, AnalysisOutcome, PipelineError, PipelineResult};
pub use tokens::{Token, TokenCategory, TokenStream};
