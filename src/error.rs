//! Error types for Wear Inspector.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading persisted or external JSON data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read the file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The JSON document is malformed or has the wrong shape.
    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The document parsed but its content violates a data rule.
    #[error("invalid data: {message}")]
    InvalidData { message: String },
}

/// Errors that can occur when exporting data.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}

/// Errors that can occur while rendering or writing the inspection report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The document library failed to assemble the DOCX package.
    #[error("failed to render document: {message}")]
    Render { message: String },

    /// The rendered document could not be written to disk.
    #[error("failed to write report '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised by sync transports and configuration.
///
/// The dispatcher converts these into `false` outcomes; they only escape
/// through [`crate::sync::Uploader`] implementations and config loading.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Sync configuration is not valid JSON for the expected layout.
    #[error("invalid sync configuration '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Local file access failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// FTP protocol or connection failure.
    #[error("FTP error: {source}")]
    Ftp {
        #[from]
        source: suppaftp::FtpError,
    },

    /// Message building or SMTP delivery failure.
    #[error("email error: {message}")]
    Email { message: String },

    /// HTTP request failure (webhook or remote storage).
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The selected transport has no usable settings.
    #[error("transport '{transport}' is not configured: {reason}")]
    NotConfigured { transport: String, reason: String },
}

/// A pooled task finished without producing a value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// The task panicked, or the pool shut down before running it.
    #[error("task did not complete")]
    Lost,
}
