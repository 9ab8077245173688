//! Machine-readable summary of one analysis run

use super::writer::ReportError;
use crate::lexical::{LexicalDiagnostic, LexicalMetrics};
use crate::symbols::{PlainIdentifierRegistry, SymbolTable};
use crate::tokens::TokenStream;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AnalysisSummary<'a> {
    pub input: String,
    pub report: String,
    #[serde(with = "rfc3339")]
    pub analyzed_at: DateTime<Utc>,
    pub build_profile: &'static str,
    pub total_tokens: usize,
    pub total_unique_symbols: usize,
    pub total_unique_identifiers: usize,
    pub tokens: &'a TokenStream,
    pub symbols: &'a SymbolTable,
    pub identifiers: &'a PlainIdentifierRegistry,
    pub metrics: &'a LexicalMetrics,
    pub diagnostics: &'a [LexicalDiagnostic],
}

impl AnalysisSummary<'_> {
    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self).map_err(|e| ReportError::SummarySerialization {
            message: e.to_string(),
        })
    }
}

mod rfc3339 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical;
    use crate::symbols::build_symbol_table;
    use chrono::TimeZone;

    #[test]
    fn test_summary_json_shape() {
        let (tokens, run) = lexical::tokenize("int a = 1; a++; $").unwrap();
        let table = build_symbol_table(&tokens).unwrap();

        let summary = AnalysisSummary {
            input: "input_code.txt".to_string(),
            report: "symbol_table_output.txt".to_string(),
            analyzed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            build_profile: "development",
            total_tokens: tokens.len(),
            total_unique_symbols: table.len(),
            total_unique_identifiers: run.registry.len(),
            tokens: &tokens,
            symbols: &table,
            identifiers: &run.registry,
            metrics: &run.metrics,
            diagnostics: &run.diagnostics,
        };

        let value: serde_json::Value =
            serde_json::from_str(&summary.to_json_pretty().unwrap()).unwrap();

        assert_eq!(value["analyzed_at"], "2024-05-01T12:00:00Z");
        assert_eq!(value["total_tokens"], 8);
        assert_eq!(value["tokens"][0]["category"], "DATATYPE");
        assert_eq!(value["symbols"][1]["classification"], "ID");
        assert_eq!(value["identifiers"]["records"][0]["name"], "a");
        assert_eq!(value["diagnostics"][0]["text"], "$");
    }
}
