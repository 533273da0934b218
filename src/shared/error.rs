use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a clean audit,
/// an audit that left packages for manual review, and a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every package resolved to license evidence
    Success = 0,
    /// At least one package needs manual review
    ManualReviewRequired = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (enumeration failure, config error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ManualReviewRequired => write!(f, "Manual Review Required (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Run-level errors.
///
/// Only these may abort a run, and only before package-level work for
/// the affected environment has started.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to enumerate conda packages: {details}\n\n💡 Hint: {hint}")]
    EnumerationError { details: String, hint: String },

    #[error("Invalid path: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing conda package directory")]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for configuration values
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl AuditError {
    /// Shorthand for an enumeration failure with the default hint
    pub fn enumeration(details: impl Into<String>) -> Self {
        AuditError::EnumerationError {
            details: details.into(),
            hint: "Check that conda is installed and on PATH, or pass --conda-exe".to_string(),
        }
    }
}

/// Per-package resolution errors.
///
/// Every variant is terminal for the package it belongs to and is turned
/// into a `ResolutionFailure` before it reaches the batch boundary.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Malformed archive identifier: '{identifier}'")]
    MalformedReference { identifier: String },

    #[error("No recipe metadata provider is known for host '{host}'")]
    UnresolvedHost { host: String },

    #[error("Failed to fetch recipe metadata from {url}: {details}")]
    MetadataFetchError { url: String, details: String },

    #[error("Expected upstream archive name to end in '{expected}', found '{filename}'")]
    UnexpectedArchiveFormat {
        filename: String,
        expected: &'static str,
    },

    #[error("Failed to fetch upstream archive {url}: {details}")]
    ArchiveFetchError { url: String, details: String },

    #[error("No LICENSE entry found in {descriptor}")]
    NoLicenseFound { descriptor: String },
}
