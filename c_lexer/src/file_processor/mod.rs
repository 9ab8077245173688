//! Bounded read of the input resource

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::log_debug;
use std::path::Path;

pub use processor::{
    normalize_line_endings, FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError,
};

/// Process a file with default settings
pub fn process_file(file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Startup check that every file processing code is registered
pub fn init_file_processor_logging() -> Result<(), String> {
    let file_codes = [
        crate::logging::codes::file_processing::FILE_NOT_FOUND,
        crate::logging::codes::file_processing::FILE_TOO_LARGE,
        crate::logging::codes::file_processing::EMPTY_FILE,
        crate::logging::codes::file_processing::PERMISSION_DENIED,
        crate::logging::codes::file_processing::INVALID_ENCODING,
        crate::logging::codes::file_processing::IO_ERROR,
        crate::logging::codes::file_processing::INVALID_PATH,
    ];

    for code in &file_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT_FOR_ANALYSIS);

    Ok(())
}
