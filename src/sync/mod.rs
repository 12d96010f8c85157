//! Report synchronization over one of four upload transports.

pub mod config;
pub mod dispatcher;
pub mod email;
pub mod ftp;
pub mod pool;
pub mod remote_storage;
pub mod webhook;

pub use crate::error::{SyncError, TaskError};
pub use config::{
    EmailSettings, FtpSettings, RemoteStorageSettings, SyncConfig, SyncMethod, WebhookSettings,
};
pub use dispatcher::{BatchSyncResult, SyncDispatcher, SyncOutcome};
pub use pool::{TaskHandle, WorkerPool};

use std::path::Path;

pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const REPORT_EXTENSION: &str = "docx";

/// One upload strategy.
///
/// Implementations make a single blocking attempt per call and leave retry
/// decisions to the caller.
pub trait Uploader: Send + Sync {
    fn method(&self) -> SyncMethod;

    fn upload(&self, path: &Path, project_name: &str) -> Result<(), SyncError>;

    /// Connectivity check that transfers no report data.
    fn test_connection(&self) -> Result<(), SyncError>;
}

fn report_filename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "report.docx".to_string())
}

fn read_report(path: &Path) -> Result<Vec<u8>, SyncError> {
    std::fs::read(path).map_err(|source| SyncError::Io {
        path: path.to_path_buf(),
        source,
    })
}
