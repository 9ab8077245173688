//! Fixed-layout text report

use crate::symbols::SymbolTable;
use crate::tokens::{Token, TokenStream};

const ATTRIBUTE_WIDTH: usize = 15;
const CLASSIFICATION_WIDTH: usize = 20;

/// `lexeme -> CATEGORY` with the lexeme left-justified
pub fn format_token_line(token: &Token) -> String {
    format!(
        "{:<width$} -> {}",
        token.lexeme,
        token.category.as_str(),
        width = ATTRIBUTE_WIDTH
    )
}

fn format_table_row(attribute: &str, classification: &str) -> String {
    format!(
        "{:<aw$} {:<cw$}\n",
        attribute,
        classification,
        aw = ATTRIBUTE_WIDTH,
        cw = CLASSIFICATION_WIDTH
    )
}

/// Render the full report for one run
pub fn render_report(source: &str, tokens: &TokenStream, table: &SymbolTable) -> String {
    let mut out = String::with_capacity(source.len() * 2 + tokens.len() * 32);

    out.push_str("LEXICAL ANALYSIS REPORT\n");
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");

    out.push_str("INPUT CODE:\n");
    out.push_str(&"-".repeat(20));
    out.push('\n');
    out.push_str(source);
    out.push_str("\n\n");

    out.push_str("TOKENS FOUND:\n");
    out.push_str(&"=".repeat(30));
    out.push('\n');
    for token in tokens {
        out.push_str(&format_token_line(token));
        out.push('\n');
    }
    out.push_str(&format!("\nTotal tokens: {}\n\n", tokens.len()));

    out.push('\n');
    out.push_str(&"=".repeat(50));
    out.push('\n');
    out.push_str("SYMBOL TABLE (TOKENS)\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');
    out.push_str(&format_table_row("ATTRIBUTES", "TOKEN/DATATYPE"));
    out.push_str(&"-".repeat(50));
    out.push('\n');
    for entry in table {
        out.push_str(&format_table_row(&entry.name, entry.classification.label()));
    }
    out.push_str(&"=".repeat(50));
    out.push('\n');
    out.push_str(&format!("Total unique symbols: {}\n", table.len()));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical;
    use crate::symbols::build_symbol_table;

    fn report_for(source: &str) -> String {
        let (tokens, _) = lexical::tokenize(source).unwrap();
        let table = build_symbol_table(&tokens).unwrap();
        render_report(source, &tokens, &table)
    }

    #[test]
    fn test_token_line_padding() {
        let (tokens, _) = lexical::tokenize("x").unwrap();
        assert_eq!(
            format_token_line(&tokens.tokens()[0]),
            "x               -> ID"
        );
    }

    #[test]
    fn test_full_layout() {
        let report = report_for("int x = 5;");

        let expected = [
            "LEXICAL ANALYSIS REPORT",
            "==================================================",
            "",
            "INPUT CODE:",
            "--------------------",
            "int x = 5;",
            "",
            "TOKENS FOUND:",
            "==============================",
            "int             -> DATATYPE",
            "x               -> ID",
            "=               -> ASSIGN_OP",
            "5               -> CONSTANT",
            ";               -> SEPARATOR",
            "",
            "Total tokens: 5",
            "",
            "",
            "==================================================",
            "SYMBOL TABLE (TOKENS)",
            "==================================================",
            "ATTRIBUTES      TOKEN/DATATYPE      ",
            "--------------------------------------------------",
            "int             Datatype            ",
            "x               ID                  ",
            "=               Assign_OP           ",
            "5               Constant            ",
            ";               Separator           ",
            "==================================================",
            "Total unique symbols: 5",
            "",
        ]
        .join("\n");

        assert_eq!(report, expected);
    }

    #[test]
    fn test_long_lexeme_is_not_truncated() {
        let report = report_for("a_rather_long_identifier;");
        assert!(report.contains("a_rather_long_identifier -> ID\n"));
        assert!(report.contains("a_rather_long_identifier ID                  \n"));
    }

    #[test]
    fn test_zero_tokens() {
        let report = report_for("// only a comment");
        assert!(report.contains("Total tokens: 0\n"));
        assert!(report.ends_with("Total unique symbols: 0\n"));
    }
}
