//! Report rendering and output
//!
//! The text report has a fixed layout: header, the verbatim input, one
//! `lexeme -> CATEGORY` line per token, then the symbol table with its
//! unique-symbol count. An optional JSON summary carries the same data
//! plus the identifier registry, metrics and lexical diagnostics.

pub mod formatter;
pub mod summary;
pub mod writer;

pub use formatter::{format_token_line, render_report};
pub use summary::AnalysisSummary;
pub use writer::{write_json_summary, write_report, ReportError};
