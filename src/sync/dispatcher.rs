use super::config::SyncConfig;
use super::email::EmailUploader;
use super::ftp::FtpUploader;
use super::pool::{TaskHandle, WorkerPool};
use super::remote_storage::RemoteStorageUploader;
use super::webhook::WebhookUploader;
use super::{SyncMethod, Uploader, REPORT_EXTENSION};
use crate::error::SyncError;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of one `sync_file` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Sync is switched off; nothing was attempted.
    Disabled,
    /// The selected transport has no uploader.
    NotConfigured { method: SyncMethod, reason: String },
    /// Exactly one upload attempt was made.
    Attempted { method: SyncMethod, success: bool },
}

impl SyncOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Attempted { success: true, .. })
    }

    /// `{transport_name: bool}` on an attempt, `{"error": message}` otherwise.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, serde_json::Value> {
        let mut map = BTreeMap::new();
        match self {
            Self::Disabled => {
                map.insert("error".to_string(), "synchronization is disabled".into());
            }
            Self::NotConfigured { method, reason } => {
                map.insert(
                    "error".to_string(),
                    format!("no uploader for '{method}': {reason}").into(),
                );
            }
            Self::Attempted { method, success } => {
                map.insert(method.to_string(), (*success).into());
            }
        }
        map
    }
}

/// Files of one `sync_project_reports` run, split by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSyncResult {
    pub synced: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// Sends finished reports through the configured transport.
///
/// Each call makes a single blocking attempt; failures are logged and
/// reported as `false`, never retried.
pub struct SyncDispatcher {
    config: SyncConfig,
    uploaders: HashMap<SyncMethod, Box<dyn Uploader>>,
}

impl SyncDispatcher {
    /// Dispatcher without any uploaders; add them with [`Self::with_uploader`].
    #[must_use]
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            uploaders: HashMap::new(),
        }
    }

    /// Builds an uploader for every transport with usable settings.
    #[must_use]
    pub fn from_config(config: SyncConfig) -> Self {
        let mut uploaders: HashMap<SyncMethod, Box<dyn Uploader>> = HashMap::new();
        for method in SyncMethod::ALL {
            match build_uploader(&config, method) {
                Ok(Some(uploader)) => {
                    uploaders.insert(method, uploader);
                }
                Ok(None) => {}
                Err(e) => debug!(%method, error = %e, "transport skipped"),
            }
        }
        Self { config, uploaders }
    }

    /// Registers (or replaces) the uploader for its transport.
    #[must_use]
    pub fn with_uploader(mut self, uploader: Box<dyn Uploader>) -> Self {
        self.uploaders.insert(uploader.method(), uploader);
        self
    }

    #[must_use]
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn sync_file(&self, path: &Path, project_name: &str) -> SyncOutcome {
        if !self.config.enabled {
            info!(path = %path.display(), "sync disabled, skipping upload");
            return SyncOutcome::Disabled;
        }

        let method = self.config.sync_method;
        let Some(uploader) = self.uploaders.get(&method) else {
            let reason = if self.config.is_configured(method) {
                "settings are incomplete"
            } else {
                "no settings"
            };
            warn!(%method, reason, "selected transport has no uploader");
            return SyncOutcome::NotConfigured {
                method,
                reason: reason.to_string(),
            };
        };

        info!(%method, path = %path.display(), project = project_name, "uploading report");
        let success = match uploader.upload(path, project_name) {
            Ok(()) => {
                info!(%method, path = %path.display(), "report uploaded");
                true
            }
            Err(e) => {
                warn!(%method, path = %path.display(), error = %e, "report upload failed");
                false
            }
        };
        SyncOutcome::Attempted { method, success }
    }

    /// Lightweight probe of `method` without sending any report.
    pub fn test_connection(&self, method: SyncMethod) -> bool {
        let Some(uploader) = self.uploaders.get(&method) else {
            warn!(%method, "cannot test unconfigured transport");
            return false;
        };
        match uploader.test_connection() {
            Ok(()) => {
                info!(%method, "connection test passed");
                true
            }
            Err(e) => {
                warn!(%method, error = %e, "connection test failed");
                false
            }
        }
    }

    /// Syncs every `.docx` report in `directory`, one at a time, in file
    /// name order. The directory name is used as the project name.
    pub fn sync_project_reports(&self, directory: &Path) -> Result<BatchSyncResult, SyncError> {
        let reports = list_reports(directory)?;
        let project_name = directory
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut result = BatchSyncResult::default();
        for report in reports {
            if self.sync_file(&report, &project_name).is_success() {
                result.synced.push(report);
            } else {
                result.failed.push(report);
            }
        }

        info!(
            directory = %directory.display(),
            synced = result.synced.len(),
            failed = result.failed.len(),
            "project sync finished"
        );
        Ok(result)
    }

    /// Runs [`Self::sync_file`] on `pool`, returning a handle to the outcome.
    pub fn sync_file_in_background(
        self: &Arc<Self>,
        pool: &WorkerPool,
        path: PathBuf,
        project_name: String,
    ) -> TaskHandle<SyncOutcome> {
        let dispatcher = Arc::clone(self);
        pool.submit(move || dispatcher.sync_file(&path, &project_name))
    }
}

fn build_uploader(config: &SyncConfig, method: SyncMethod) -> Result<Option<Box<dyn Uploader>>, SyncError> {
    let uploader: Box<dyn Uploader> = match method {
        SyncMethod::Ftp => match &config.ftp {
            Some(settings) => Box::new(FtpUploader::from_settings(settings)?),
            None => return Ok(None),
        },
        SyncMethod::Email => match &config.email {
            Some(settings) => Box::new(EmailUploader::from_settings(settings)?),
            None => return Ok(None),
        },
        SyncMethod::Webhook => match &config.webhook {
            Some(settings) => Box::new(WebhookUploader::from_settings(settings)?),
            None => return Ok(None),
        },
        SyncMethod::RemoteStorage => match &config.remote_storage {
            Some(settings) => Box::new(RemoteStorageUploader::from_settings(settings)?),
            None => return Ok(None),
        },
    };
    Ok(Some(uploader))
}

fn list_reports(directory: &Path) -> Result<Vec<PathBuf>, SyncError> {
    let entries = std::fs::read_dir(directory).map_err(|source| SyncError::Io {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut reports: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(REPORT_EXTENSION))
        })
        .collect();
    reports.sort();
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::config::WebhookSettings;
    use pretty_assertions::assert_eq;

    struct AlwaysFails;

    impl Uploader for AlwaysFails {
        fn method(&self) -> SyncMethod {
            SyncMethod::Webhook
        }

        fn upload(&self, _path: &Path, _project_name: &str) -> Result<(), SyncError> {
            Err(SyncError::Http {
                message: "503".to_string(),
            })
        }

        fn test_connection(&self) -> Result<(), SyncError> {
            Err(SyncError::Http {
                message: "unreachable".to_string(),
            })
        }
    }

    fn enabled(method: SyncMethod) -> SyncConfig {
        SyncConfig {
            enabled: true,
            sync_method: method,
            ..SyncConfig::default()
        }
    }

    #[test]
    fn outcome_maps_match_documented_shapes() {
        let attempted = SyncOutcome::Attempted {
            method: SyncMethod::Ftp,
            success: true,
        };
        assert_eq!(attempted.to_map().get("ftp"), Some(&serde_json::Value::Bool(true)));
        assert!(SyncOutcome::Disabled.to_map().contains_key("error"));
        assert!(!SyncOutcome::Disabled.is_success());
    }

    #[test]
    fn missing_transport_settings_give_error_entry() {
        let dispatcher = SyncDispatcher::from_config(enabled(SyncMethod::Email));
        let outcome = dispatcher.sync_file(Path::new("report.docx"), "p");
        assert_eq!(
            outcome,
            SyncOutcome::NotConfigured {
                method: SyncMethod::Email,
                reason: "no settings".to_string(),
            }
        );
        assert!(outcome.to_map().contains_key("error"));
    }

    #[test]
    fn incomplete_settings_are_reported_as_such() {
        let config = SyncConfig {
            webhook: Some(WebhookSettings {
                url: String::new(),
                token: None,
            }),
            ..enabled(SyncMethod::Webhook)
        };
        let dispatcher = SyncDispatcher::from_config(config);
        assert!(matches!(
            dispatcher.sync_file(Path::new("report.docx"), "p"),
            SyncOutcome::NotConfigured { reason, .. } if reason == "settings are incomplete"
        ));
    }

    #[test]
    fn upload_error_becomes_false() {
        let dispatcher =
            SyncDispatcher::new(enabled(SyncMethod::Webhook)).with_uploader(Box::new(AlwaysFails));
        assert_eq!(
            dispatcher.sync_file(Path::new("report.docx"), "p"),
            SyncOutcome::Attempted {
                method: SyncMethod::Webhook,
                success: false,
            }
        );
        assert!(!dispatcher.test_connection(SyncMethod::Webhook));
        assert!(!dispatcher.test_connection(SyncMethod::Ftp));
    }

    #[test]
    fn from_config_builds_only_usable_transports() {
        let config = SyncConfig {
            webhook: Some(WebhookSettings {
                url: "https://hooks.example.com/reports".to_string(),
                token: None,
            }),
            ..enabled(SyncMethod::Webhook)
        };
        let dispatcher = SyncDispatcher::from_config(config);
        assert_eq!(dispatcher.uploaders.len(), 1);
        assert!(dispatcher.uploaders.contains_key(&SyncMethod::Webhook));
    }

    #[test]
    fn list_reports_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.docx", "a.DOCX", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.docx")).unwrap();

        let names: Vec<String> = list_reports(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.DOCX".to_string(), "b.docx".to_string()]);
    }
}
