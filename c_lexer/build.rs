// build.rs - TOML-driven compile-time constant generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    symbols: SymbolLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
    max_line_count_for_analysis: usize,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_token_count: usize,
    max_identifier_length: usize,
    max_string_size: usize,
    max_comment_length: usize,
    max_reported_gaps: usize,
}

#[derive(serde::Deserialize)]
struct SymbolLimits {
    max_symbol_entries: usize,
    max_plain_identifiers: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_error_collection: usize,
    max_log_message_length: usize,
    max_log_events_per_file: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CLEX_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=CLEX_CONFIG_DIR");

    let profile = env::var("CLEX_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("CLEX_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the c_lexer directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_security_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_security_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_TOKEN_COUNT: usize = 100_000_000;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("SECURITY: max_file_size exceeds absolute maximum");
    }

    if config.file_processing.large_file_threshold > config.file_processing.max_file_size {
        panic!("SECURITY: large_file_threshold must not exceed max_file_size");
    }

    if config.lexical.max_token_count > ABSOLUTE_MAX_TOKEN_COUNT {
        panic!("SECURITY: max_token_count exceeds absolute maximum");
    }

    if config.lexical.max_identifier_length == 0 {
        panic!("SECURITY: max_identifier_length must be non-zero");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("SECURITY: security_min_log_level too high (max: 2)");
    }

    if profile == "production" {
        if config.file_processing.max_file_size > 50_000_000 {
            panic!("PRODUCTION: max_file_size too high for production");
        }
        if config.symbols.max_symbol_entries > 1_000_000 {
            panic!("PRODUCTION: max_symbol_entries too high for production");
        }
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const LARGE_FILE_THRESHOLD: u64 = {};
        pub const MAX_LINE_COUNT_FOR_ANALYSIS: usize = {};
    }}

    pub mod lexical {{
        pub const MAX_TOKEN_COUNT: usize = {};
        pub const MAX_IDENTIFIER_LENGTH: usize = {};
        pub const MAX_STRING_SIZE: usize = {};
        pub const MAX_COMMENT_LENGTH: usize = {};
        pub const MAX_REPORTED_GAPS: usize = {};
    }}

    pub mod symbols {{
        pub const MAX_SYMBOL_ENTRIES: usize = {};
        pub const MAX_PLAIN_IDENTIFIERS: usize = {};
    }}

    pub mod logging {{
        pub const MAX_ERROR_COLLECTION: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // File Processing
        config.file_processing.max_file_size,
        config.file_processing.large_file_threshold,
        config.file_processing.max_line_count_for_analysis,
        // Lexical
        config.lexical.max_token_count,
        config.lexical.max_identifier_length,
        config.lexical.max_string_size,
        config.lexical.max_comment_length,
        config.lexical.max_reported_gaps,
        // Symbols
        config.symbols.max_symbol_entries,
        config.symbols.max_plain_identifiers,
        // Logging
        config.logging.max_error_collection,
        config.logging.max_log_message_length,
        config.logging.max_log_events_per_file,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
