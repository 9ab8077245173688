//! File processor implementation with compile-time constants and global logging integration

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_performance, log_success, log_warning};
use std::fs;
use std::path::{Path, PathBuf};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::FileTooLarge { .. } | FileProcessorError::TooManyLines { .. } => {
                codes::file_processing::FILE_TOO_LARGE
            }
            FileProcessorError::EmptyFile => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    /// Check if this error should halt processing
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> codes::Severity {
        codes::get_severity(self.error_code().as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    /// Missing input, as opposed to input that exists but cannot be used
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FileProcessorError::FileNotFound { .. } | FileProcessorError::InvalidPath { .. }
        )
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    pub extension: Option<String>,
    /// Number of lines after normalization
    pub line_count: usize,
    pub modified: Option<std::time::SystemTime>,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Above the compile-time large file threshold
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

/// Source text read from disk, ready for scanning
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: std::time::Duration,
    /// Number of `\r\n` sequences rewritten to `\n`
    pub normalized_line_endings: usize,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Only whitespace
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }

    /// Characters per millisecond
    pub fn processing_rate(&self) -> f64 {
        let duration_ms = self.processing_duration.as_secs_f64() * 1000.0;
        if duration_ms > 0.0 {
            self.char_count() as f64 / duration_ms
        } else {
            0.0
        }
    }
}

/// File processor with compile-time security constants and runtime preferences
#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub normalize_line_endings: bool,
    pub enable_performance_logging: bool,
    pub warn_on_large_files: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            normalize_line_endings: true,
            enable_performance_logging: true,
            warn_on_large_files: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            normalize_line_endings: prefs.normalize_line_endings,
            enable_performance_logging: prefs.enable_performance_logging,
            warn_on_large_files: prefs.warn_on_large_files,
        }
    }

    pub fn with_line_ending_normalization(mut self, enabled: bool) -> Self {
        self.normalize_line_endings = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a file and return its contents with metadata
    pub fn process_file(&self, file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = std::time::Instant::now();
        let display_path = file_path.display().to_string();

        log_debug!("Starting file processing", "file" => display_path.as_str());

        let path = self.validate_path(file_path)?;
        let metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata, &display_path)?;

        let raw = self.read_file(&path, &display_path)?;
        let (source, normalized_line_endings) = if self.normalize_line_endings {
            normalize_line_endings(raw)
        } else {
            (raw, 0)
        };

        if source.is_empty() {
            let error = FileProcessorError::EmptyFile;
            log_error!(error.error_code(), "File is empty", "file" => display_path.as_str());
            return Err(error);
        }

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT_FOR_ANALYSIS {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT_FOR_ANALYSIS,
            };
            log_error!(error.error_code(), "File exceeds maximum line count for safe analysis",
                "file" => display_path.as_str(),
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT_FOR_ANALYSIS);
            return Err(error);
        }

        let mut final_metadata = metadata;
        final_metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata: final_metadata,
            processing_duration: start_time.elapsed(),
            normalized_line_endings,
        };

        self.log_processing_success(&result, &display_path);
        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        if self.enable_performance_logging {
            log_performance!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                duration = result.processing_duration,
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "crlf_normalized" => result.normalized_line_endings,
                "chars_per_ms" => format!("{:.2}", result.processing_rate())
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "lines" => result.metadata.line_count
            );
        }
    }

    fn validate_path(&self, file_path: &Path) -> Result<PathBuf, FileProcessorError> {
        let display_path = file_path.display().to_string();

        if file_path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath { path: display_path };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !file_path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: display_path.clone(),
            };
            log_error!(error.error_code(), "File not found", "path" => display_path);
            return Err(error);
        }

        if !file_path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: display_path.clone(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => display_path);
            return Err(error);
        }

        match file_path.canonicalize() {
            Ok(canonical_path) => {
                log_debug!("Path validation successful",
                    "canonical_path" => canonical_path.display());
                Ok(canonical_path)
            }
            Err(e) => {
                let error = FileProcessorError::IoError {
                    message: format!("Failed to resolve path '{}': {}", display_path, e),
                };
                log_error!(error.error_code(), "Failed to canonicalize path",
                    "path" => display_path,
                    "io_error" => e);
                Err(error)
            }
        }
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = match e.kind() {
                std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                    path: path.display().to_string(),
                },
                _ => FileProcessorError::IoError {
                    message: format!("Failed to read metadata for '{}': {}", path.display(), e),
                },
            };
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e);
            error
        })?;

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            extension: path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|s| s.to_lowercase()),
            line_count: 0,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_bytes" => file_metadata.size,
            "size_human" => file_metadata.human_readable_size(),
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "is_large_file" => file_metadata.is_large_file());

        Ok(file_metadata)
    }

    fn validate_file(&self, metadata: &FileMetadata, file_path: &str) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_bytes" => metadata.size,
                "size_human" => metadata.human_readable_size(),
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }

        if metadata.is_large_file() && self.warn_on_large_files {
            log_warning!("Large input file",
                "file" => file_path,
                "size_human" => metadata.human_readable_size(),
                "threshold_bytes" => LARGE_FILE_THRESHOLD);
        }

        Ok(())
    }

    fn read_file(&self, path: &Path, file_path: &str) -> Result<String, FileProcessorError> {
        match fs::read_to_string(path) {
            Ok(content) => {
                log_debug!("File content read successfully",
                    "file" => file_path,
                    "bytes" => content.len());
                Ok(content)
            }
            Err(e) => {
                let error = match e.kind() {
                    std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                        path: path.display().to_string(),
                    },
                    std::io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                        path: path.display().to_string(),
                    },
                    _ => FileProcessorError::IoError {
                        message: format!("Failed to read file '{}': {}", path.display(), e),
                    },
                };
                log_error!(error.error_code(), "Failed to read file",
                    "file" => file_path,
                    "io_error" => e);
                Err(error)
            }
        }
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite `\r\n` and lone `\r` to `\n`, returning the text and the number of rewrites
pub fn normalize_line_endings(source: String) -> (String, usize) {
    let count = source.matches('\r').count();
    if count == 0 {
        (source, 0)
    } else {
        (source.replace("\r\n", "\n").replace('\r', "\n"), count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("input_code.txt");
        let content = "int x = 5;\nx++;\n";
        fs::write(&file_path, content).unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();

        assert_eq!(result.metadata.line_count, 2);
        assert_eq!(result.metadata.extension.as_deref(), Some("txt"));
        assert_eq!(result.char_count(), content.chars().count());
        assert!(!result.is_effectively_empty());
        assert_eq!(result.normalized_line_endings, 0);
    }

    #[test]
    fn test_file_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt");

        let err = FileProcessor::new().process_file(&missing).unwrap_err();
        assert_matches!(err, FileProcessorError::FileNotFound { .. });
        assert!(err.is_not_found());
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        let err = FileProcessor::new().process_file(dir.path()).unwrap_err();
        assert_matches!(err, FileProcessorError::InvalidPath { .. });
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.txt");
        fs::write(&file_path, "").unwrap();

        let err = FileProcessor::new().process_file(&file_path).unwrap_err();
        assert_matches!(err, FileProcessorError::EmptyFile);
    }

    #[test]
    fn test_whitespace_only_file_is_not_empty() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("blank.txt");
        fs::write(&file_path, "  \n").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert!(result.is_effectively_empty());
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("binary.txt");
        fs::write(&file_path, [0x66, 0xff, 0xfe, 0x0a]).unwrap();

        let err = FileProcessor::new().process_file(&file_path).unwrap_err();
        assert_matches!(err, FileProcessorError::InvalidEncoding { .. });
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_crlf_is_normalized() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("windows.txt");
        fs::write(&file_path, "int a;\r\nint b;\r\n").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert_eq!(result.source, "int a;\nint b;\n");
        assert_eq!(result.normalized_line_endings, 2);

        let raw = FileProcessor::new()
            .with_line_ending_normalization(false)
            .process_file(&file_path)
            .unwrap();
        assert_eq!(raw.source, "int a;\r\nint b;\r\n");
    }

    #[test]
    fn test_too_many_lines() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("many_lines.txt");
        fs::write(&file_path, "x\n".repeat(MAX_LINE_COUNT_FOR_ANALYSIS + 1)).unwrap();

        let err = FileProcessor::new().process_file(&file_path).unwrap_err();
        assert_matches!(err, FileProcessorError::TooManyLines { lines, max_lines }
            if lines > MAX_LINE_COUNT_FOR_ANALYSIS && max_lines == MAX_LINE_COUNT_FOR_ANALYSIS);
    }

    #[test]
    fn test_error_methods() {
        let error = FileProcessorError::FileNotFound {
            path: "input_code.txt".to_string(),
        };

        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert_eq!(error.severity(), codes::Severity::High);
        assert!(error.requires_halt());
    }

    #[test]
    fn test_from_preferences() {
        let prefs = FileProcessorPreferences {
            normalize_line_endings: false,
            enable_performance_logging: false,
            warn_on_large_files: true,
        };

        let processor = FileProcessor::from_preferences(&prefs);
        assert!(!processor.normalize_line_endings);
        assert!(!processor.enable_performance_logging);
        assert!(processor.warn_on_large_files);
    }

    #[test]
    fn test_human_readable_size() {
        let metadata = FileMetadata {
            path: PathBuf::from("a.txt"),
            size: 2048,
            extension: None,
            line_count: 0,
            modified: None,
        };
        assert_eq!(metadata.human_readable_size(), "2.00 KB");
        assert!(!metadata.is_large_file());
    }
}
