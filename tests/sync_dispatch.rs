use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wear_inspector::sync::{
    SyncConfig, SyncDispatcher, SyncError, SyncMethod, SyncOutcome, Uploader, WorkerPool,
};

#[derive(Default)]
struct Recorded {
    uploads: AtomicUsize,
    probes: AtomicUsize,
    seen: Mutex<Vec<(PathBuf, String)>>,
    reject: Vec<String>,
}

/// Records every call; uploads of files named in `reject` fail.
#[derive(Clone, Default)]
struct RecordingUploader(Arc<Recorded>);

impl RecordingUploader {
    fn rejecting(names: &[&str]) -> Self {
        Self(Arc::new(Recorded {
            reject: names.iter().map(|n| (*n).to_string()).collect(),
            ..Recorded::default()
        }))
    }

    fn uploads(&self) -> usize {
        self.0.uploads.load(Ordering::SeqCst)
    }

    fn probes(&self) -> usize {
        self.0.probes.load(Ordering::SeqCst)
    }

    fn seen(&self) -> Vec<(PathBuf, String)> {
        self.0.seen.lock().unwrap().clone()
    }
}

impl Uploader for RecordingUploader {
    fn method(&self) -> SyncMethod {
        SyncMethod::Ftp
    }

    fn upload(&self, path: &Path, project_name: &str) -> Result<(), SyncError> {
        self.0.uploads.fetch_add(1, Ordering::SeqCst);
        self.0
            .seen
            .lock()
            .unwrap()
            .push((path.to_path_buf(), project_name.to_string()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        if self.0.reject.contains(&name) {
            return Err(SyncError::Http {
                message: "rejected".to_string(),
            });
        }
        Ok(())
    }

    fn test_connection(&self) -> Result<(), SyncError> {
        self.0.probes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn config(enabled: bool) -> SyncConfig {
    SyncConfig {
        enabled,
        sync_method: SyncMethod::Ftp,
        ..SyncConfig::default()
    }
}

#[test]
fn disabled_sync_never_touches_transport() {
    let uploader = RecordingUploader::default();
    let dispatcher =
        SyncDispatcher::new(config(false)).with_uploader(Box::new(uploader.clone()));

    let outcome = dispatcher.sync_file(Path::new("report.docx"), "Проект");

    assert_eq!(outcome, SyncOutcome::Disabled);
    assert!(!outcome.is_success());
    assert!(outcome.to_map().contains_key("error"));
    assert_eq!(uploader.uploads(), 0);
    assert_eq!(uploader.probes(), 0);
}

#[test]
fn enabled_sync_makes_exactly_one_attempt() {
    let uploader = RecordingUploader::default();
    let dispatcher =
        SyncDispatcher::new(config(true)).with_uploader(Box::new(uploader.clone()));

    let outcome = dispatcher.sync_file(Path::new("report.docx"), "Проект");

    assert_eq!(
        outcome.to_map().get("ftp"),
        Some(&serde_json::Value::Bool(true))
    );
    assert_eq!(uploader.uploads(), 1);
    assert_eq!(
        uploader.seen(),
        vec![(PathBuf::from("report.docx"), "Проект".to_string())]
    );
}

#[test]
fn test_connection_probes_without_upload() {
    let uploader = RecordingUploader::default();
    let dispatcher =
        SyncDispatcher::new(config(true)).with_uploader(Box::new(uploader.clone()));

    assert!(dispatcher.test_connection(SyncMethod::Ftp));
    assert_eq!(uploader.probes(), 1);
    assert_eq!(uploader.uploads(), 0);
}

#[test]
fn project_batch_partitions_results() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("Школа 5");
    std::fs::create_dir(&project).unwrap();
    for name in ["a.docx", "b.docx", "c.docx", "readme.txt"] {
        std::fs::write(project.join(name), b"PK").unwrap();
    }

    let uploader = RecordingUploader::rejecting(&["b.docx"]);
    let dispatcher =
        SyncDispatcher::new(config(true)).with_uploader(Box::new(uploader.clone()));

    let result = dispatcher.sync_project_reports(&project).unwrap();

    assert_eq!(result.synced, vec![project.join("a.docx"), project.join("c.docx")]);
    assert_eq!(result.failed, vec![project.join("b.docx")]);
    assert_eq!(uploader.uploads(), 3);
    assert!(uploader
        .seen()
        .iter()
        .all(|(_, project_name)| project_name == "Школа 5"));
}

#[test]
fn batch_with_disabled_sync_fails_every_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.docx"), b"PK").unwrap();

    let uploader = RecordingUploader::default();
    let dispatcher =
        SyncDispatcher::new(config(false)).with_uploader(Box::new(uploader.clone()));

    let result = dispatcher.sync_project_reports(dir.path()).unwrap();
    assert!(result.synced.is_empty());
    assert_eq!(result.failed.len(), 1);
    assert_eq!(uploader.uploads(), 0);
}

#[test]
fn missing_directory_is_an_error() {
    let dispatcher = SyncDispatcher::new(config(true));
    assert!(matches!(
        dispatcher.sync_project_reports(Path::new("/no/such/project")),
        Err(SyncError::Io { .. })
    ));
}

#[test]
fn background_sync_returns_outcome_through_handle() {
    let uploader = RecordingUploader::default();
    let dispatcher = Arc::new(
        SyncDispatcher::new(config(true)).with_uploader(Box::new(uploader.clone())),
    );
    let pool = WorkerPool::new(2, 4);

    let handles: Vec<_> = ["one.docx", "two.docx"]
        .into_iter()
        .map(|name| {
            dispatcher.sync_file_in_background(&pool, PathBuf::from(name), "P".to_string())
        })
        .collect();

    for handle in handles {
        assert!(handle.wait().unwrap().is_success());
    }
    assert_eq!(uploader.uploads(), 2);
}
