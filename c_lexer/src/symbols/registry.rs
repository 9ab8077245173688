//! Registry of plain identifiers, the names left as `ID` after reclassification

use super::error::{SymbolError, SymbolResult};
use crate::config::compile_time::symbols::MAX_PLAIN_IDENTIFIERS;
use crate::tokens::TokenCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Only scope the lexer knows about
pub const GLOBAL_SCOPE: &str = "global";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierRecord {
    pub name: String,
    pub token_type: TokenCategory,
    /// 1-based line of the first occurrence
    pub line: u32,
    pub scope: String,
}

/// Insertion-ordered, first-writer-wins identifier registry
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlainIdentifierRegistry {
    records: Vec<IdentifierRecord>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl PlainIdentifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` seen on `line`. Returns `false` when the name is already present,
    /// in which case the first record is left untouched.
    pub fn insert(&mut self, name: &str, line: u32) -> SymbolResult<bool> {
        if self.index.contains_key(name) {
            return Ok(false);
        }
        if self.records.len() >= MAX_PLAIN_IDENTIFIERS {
            return Err(SymbolError::IdentifierLimitExceeded {
                identifier: name.to_string(),
            });
        }

        self.index.insert(name.to_string(), self.records.len());
        self.records.push(IdentifierRecord {
            name: name.to_string(),
            token_type: TokenCategory::Id,
            line,
            scope: GLOBAL_SCOPE.to_string(),
        });
        Ok(true)
    }

    pub fn lookup(&self, name: &str) -> Option<&IdentifierRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in first-occurrence order
    pub fn iter(&self) -> std::slice::Iter<'_, IdentifierRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_writer_wins() {
        let mut registry = PlainIdentifierRegistry::new();

        assert_eq!(registry.insert("count", 3), Ok(true));
        assert_eq!(registry.insert("count", 9), Ok(false));
        assert_eq!(registry.len(), 1);

        let record = registry.lookup("count").unwrap();
        assert_eq!(record.line, 3);
        assert_eq!(record.token_type, TokenCategory::Id);
        assert_eq!(record.scope, GLOBAL_SCOPE);
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut registry = PlainIdentifierRegistry::new();
        for (line, name) in ["b", "a", "c", "a"].iter().enumerate() {
            registry.insert(name, line as u32 + 1).unwrap();
        }

        assert_eq!(registry.names(), vec!["b", "a", "c"]);
        assert!(registry.contains("c"));
        assert!(registry.lookup("z").is_none());
    }
}
