//! Configuration module for the lexer
//! Compile-time limits come from the TOML profile processed by build.rs

// Generated by build.rs from config/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("CLEX_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("CLEX_CONFIG_DIR").unwrap_or("config")
    }

    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}
