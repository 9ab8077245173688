/// Check that every stage is configured before the first run
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;
    crate::lexical::validate_tokenization()?;

    let stage_codes = [
        crate::logging::codes::symbols::SYMBOL_LIMIT_EXCEEDED,
        crate::logging::codes::symbols::IDENTIFIER_LIMIT_EXCEEDED,
        crate::logging::codes::report::REPORT_WRITE_FAILED,
        crate::logging::codes::report::SUMMARY_SERIALIZATION_FAILED,
    ];
    for code in &stage_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Error code {} not found in metadata registry", code));
        }
    }

    crate::log_success!(
        crate::logging::codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Pipeline validation succeeded",
        "stages_validated" => 4,
        "build_profile" => crate::config::build_info::profile()
    );

    Ok(())
}
