//! Structured error handling and exit codes.

use std::path::PathBuf;

use serde::Serialize;

use crate::duplicates::FinderError;
use crate::output::ReportError;

/// Exit codes for the basedupe application.
///
/// - 0: Success (including when base and search are the same folder)
/// - 1: Invalid arguments
/// - 2: Base folder missing or not a directory
/// - 3: Search folder missing or not a directory
/// - 4: Fatal traversal failure
/// - 5: Log or configuration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: both scans completed and the log was written.
    Success = 0,
    /// Wrong number of arguments or an unparsable option.
    InvalidArguments = 1,
    /// The base folder does not exist or is not a directory.
    InvalidBaseFolder = 2,
    /// The search folder does not exist or is not a directory.
    InvalidSearchFolder = 3,
    /// A directory walk failed.
    ScanFailed = 4,
    /// The log could not be written or the configuration is invalid.
    OutputFailed = 5,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "BD000",
            Self::InvalidArguments => "BD001",
            Self::InvalidBaseFolder => "BD002",
            Self::InvalidSearchFolder => "BD003",
            Self::ScanFailed => "BD004",
            Self::OutputFailed => "BD005",
        }
    }
}

/// Fatal errors raised by the application driver.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Base folder is missing.
    #[error("Main folder does not exist: {0}")]
    BaseFolderMissing(PathBuf),

    /// Base path exists but is a file.
    #[error("{0} exists, but is not a folder")]
    BaseNotAFolder(PathBuf),

    /// Search folder is missing.
    #[error("Search folder does not exist: {0}")]
    SearchFolderMissing(PathBuf),

    /// Search path exists but is a file.
    #[error("{0} exists, but is not a folder")]
    SearchNotAFolder(PathBuf),

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A scan phase failed.
    #[error(transparent)]
    Scan(#[from] FinderError),

    /// The duplicate log could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The JSON report could not be produced.
    #[error("Cannot write JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Exit code to terminate with for this error.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::BaseFolderMissing(_) | Self::BaseNotAFolder(_) => ExitCode::InvalidBaseFolder,
            Self::SearchFolderMissing(_) | Self::SearchNotAFolder(_) => {
                ExitCode::InvalidSearchFolder
            }
            Self::Scan(_) => ExitCode::ScanFailed,
            Self::Config(_) | Self::Report(_) | Self::Json(_) => ExitCode::OutputFailed,
        }
    }
}

/// Exit code for an error returned from [`crate::run_app`].
///
/// Errors that are not an [`AppError`] are treated as output failures.
#[must_use]
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    if let Some(app) = err.downcast_ref::<AppError>() {
        app.exit_code()
    } else if err.downcast_ref::<FinderError>().is_some() {
        ExitCode::ScanFailed
    } else {
        ExitCode::OutputFailed
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "BD002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self::from_message(err.to_string(), exit_code)
    }

    /// Create a structured error from a plain message.
    #[must_use]
    pub fn from_message(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: message.into(),
        }
    }
}
