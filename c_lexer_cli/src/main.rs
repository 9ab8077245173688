//! clex: analyze a C source file and write its symbol table report

use c_lexer::config::runtime::RuntimeConfig;
use c_lexer::pipeline::{self, AnalysisOutcome, InputFailure, PipelineError, PipelineResult};
use c_lexer::report::format_token_line;
use c_lexer::{log_info, logging};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Lexical analyzer with symbol table
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// C source file to analyze
    #[arg(value_name = "INPUT", default_value = "input_code.txt")]
    input: PathBuf,

    /// Report file, overwritten on every run
    #[arg(value_name = "OUTPUT", default_value = "symbol_table_output.txt")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = RuntimeConfig::from_env()?;
    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;
    pipeline::validate_pipeline()?;
    log_info!("clex starting", "input" => args.input.display());

    let stdout = io::stdout();
    let succeeded = run(&args, &config, &mut stdout.lock())?;

    logging::print_cargo_style_summary();
    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}

/// Run one analysis and narrate it to `out`. Returns whether any token was produced.
fn run(args: &Args, config: &RuntimeConfig, out: &mut impl Write) -> io::Result<bool> {
    let input = args.input.display();
    let output = args.output.display();

    writeln!(out, "LEXICAL ANALYZER WITH SYMBOL TABLE")?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "This program reads C code from '{}' file", input)?;
    writeln!(out, "and generates a symbol table in '{}'", output)?;
    writeln!(out, "{}", "-".repeat(60))?;
    writeln!(out, "LEXICAL ANALYZER - TXT FILE INPUT")?;
    writeln!(out, "{}", "=".repeat(50))?;

    let outcome = pipeline::analyze_file_with_config(&args.input, &args.output, config);

    let succeeded = match outcome {
        Ok(AnalysisOutcome::Completed(result)) => {
            narrate_result(args, &result, out)?;
            result.has_tokens()
        }
        Ok(AnalysisOutcome::NoCode) => false,
        Err(error) => {
            narrate_error(args, &error, out)?;
            false
        }
    };

    if succeeded {
        writeln!(out, "\nAnalysis completed successfully!")?;
        writeln!(out, "Check '{}' for detailed symbol table", output)?;
    } else {
        writeln!(out, "Analysis failed or no code found!")?;
    }
    Ok(succeeded)
}

fn narrate_result(args: &Args, result: &PipelineResult, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Reading code from: {}", args.input.display())?;
    writeln!(out, "Code content:")?;
    writeln!(out, "{}", "-".repeat(20))?;
    writeln!(out, "{}", result.source)?;
    writeln!(out, "\nAnalyzing...")?;

    writeln!(out, "\nTOKENS GENERATED:")?;
    writeln!(out, "{}", "=".repeat(30))?;
    for token in &result.tokens {
        writeln!(out, "{}", format_token_line(token))?;
    }

    if result.report_written {
        writeln!(out, "\nSymbol table saved to: {}", result.report_path.display())?;
    }
    writeln!(out, "Total tokens found: {}", result.token_count())?;
    writeln!(out, "Total unique identifiers: {}", result.unique_identifier_count())?;
    Ok(())
}

fn narrate_error(args: &Args, error: &PipelineError, out: &mut impl Write) -> io::Result<()> {
    match error.input_failure() {
        Some(InputFailure::NotFound) => {
            writeln!(out, "Error: File '{}' not found!", args.input.display())
        }
        Some(InputFailure::Unreadable) => {
            writeln!(out, "Error: File '{}' could not be read: {}", args.input.display(), error)
        }
        None => writeln!(out, "Error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn narrate(args: &Args) -> (bool, String) {
        let mut out = Vec::new();
        let succeeded = run(args, &RuntimeConfig::default(), &mut out).unwrap();
        (succeeded, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["clex"]);
        assert_eq!(args.input, PathBuf::from("input_code.txt"));
        assert_eq!(args.output, PathBuf::from("symbol_table_output.txt"));
    }

    #[test]
    fn test_successful_narration() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input_code.txt");
        let output = dir.path().join("symbol_table_output.txt");
        fs::write(&input, "int x = 5;").unwrap();

        let args = Args {
            input: input.clone(),
            output: output.clone(),
        };
        let (succeeded, text) = narrate(&args);
        assert!(succeeded);

        let expected_tail = format!(
            "Code content:\n--------------------\nint x = 5;\n\nAnalyzing...\n\n\
             TOKENS GENERATED:\n==============================\n\
             int             -> DATATYPE\n\
             x               -> ID\n\
             =               -> ASSIGN_OP\n\
             5               -> CONSTANT\n\
             ;               -> SEPARATOR\n\
             \nSymbol table saved to: {}\n\
             Total tokens found: 5\n\
             Total unique identifiers: 1\n\
             \nAnalysis completed successfully!\n\
             Check '{}' for detailed symbol table\n",
            output.display(),
            output.display()
        );
        assert!(text.starts_with("LEXICAL ANALYZER WITH SYMBOL TABLE\n"));
        assert!(text.ends_with(&expected_tail), "{text}");
        assert!(output.exists());
    }

    #[test]
    fn test_missing_input_narration() {
        let dir = tempdir().unwrap();
        let args = Args {
            input: dir.path().join("input_code.txt"),
            output: dir.path().join("out.txt"),
        };

        let (succeeded, text) = narrate(&args);
        assert!(!succeeded);
        assert!(text.ends_with(&format!(
            "Error: File '{}' not found!\nAnalysis failed or no code found!\n",
            args.input.display()
        )));
        assert!(!args.output.exists());
    }

    #[test]
    fn test_empty_input_narration() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input_code.txt");
        fs::write(&input, "").unwrap();
        let args = Args {
            input,
            output: dir.path().join("out.txt"),
        };

        let (succeeded, text) = narrate(&args);
        assert!(!succeeded);
        assert!(text.ends_with(&format!(
            "{}\nAnalysis failed or no code found!\n",
            "=".repeat(50)
        )));
    }

    #[test]
    fn test_comment_only_input_fails_but_reports() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("input_code.txt");
        fs::write(&input, "// just a note").unwrap();
        let args = Args {
            input,
            output: dir.path().join("out.txt"),
        };

        let (succeeded, text) = narrate(&args);
        assert!(!succeeded);
        assert!(text.contains("Total tokens found: 0\n"));
        assert!(args.output.exists());
    }
}
