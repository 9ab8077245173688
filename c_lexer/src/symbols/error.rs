//! Symbol table errors

use crate::config::compile_time::symbols::{MAX_PLAIN_IDENTIFIERS, MAX_SYMBOL_ENTRIES};
use crate::logging::codes::{self, Code, Severity};

/// Result type for symbol table operations
pub type SymbolResult<T> = Result<T, SymbolError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolError {
    #[error("Symbol table limit exceeded: more than {MAX_SYMBOL_ENTRIES} unique entries (at '{lexeme}')")]
    SymbolLimitExceeded { lexeme: String },

    #[error("Identifier registry limit exceeded: more than {MAX_PLAIN_IDENTIFIERS} identifiers (at '{identifier}')")]
    IdentifierLimitExceeded { identifier: String },
}

impl SymbolError {
    pub fn error_code(&self) -> Code {
        match self {
            SymbolError::SymbolLimitExceeded { .. } => codes::symbols::SYMBOL_LIMIT_EXCEEDED,
            SymbolError::IdentifierLimitExceeded { .. } => {
                codes::symbols::IDENTIFIER_LIMIT_EXCEEDED
            }
        }
    }

    pub fn severity(&self) -> Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}
