use super::config::RemoteStorageSettings;
use super::{read_report, report_filename, SyncMethod, Uploader, DOCX_MIME};
use crate::error::SyncError;
use std::path::Path;

const DEFAULT_UPLOAD_URL: &str =
    "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";
const DEFAULT_PROBE_URL: &str = "https://www.googleapis.com/drive/v3/about?fields=user";
const BOUNDARY: &str = "wear-inspector-7f3a9c1e";

/// Uploads reports into a folder of a Drive-style storage API.
pub struct RemoteStorageUploader {
    settings: RemoteStorageSettings,
    agent: ureq::Agent,
}

impl RemoteStorageUploader {
    pub fn from_settings(settings: &RemoteStorageSettings) -> Result<Self, SyncError> {
        let reason = if settings.folder_id.trim().is_empty() {
            Some("missing folder id")
        } else if settings.access_token.is_empty() {
            Some("missing access token")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(SyncError::NotConfigured {
                transport: SyncMethod::RemoteStorage.to_string(),
                reason: reason.to_string(),
            });
        }
        Ok(Self {
            settings: settings.clone(),
            agent: ureq::Agent::new_with_defaults(),
        })
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.settings.access_token)
    }
}

impl Uploader for RemoteStorageUploader {
    fn method(&self) -> SyncMethod {
        SyncMethod::RemoteStorage
    }

    fn upload(&self, path: &Path, project_name: &str) -> Result<(), SyncError> {
        let metadata = serde_json::json!({
            "name": report_filename(path),
            "parents": [self.settings.folder_id],
            "description": format!("Проект: {project_name}"),
        });
        let body = multipart_related_body(&metadata, &read_report(path)?);
        let url = self
            .settings
            .upload_url
            .as_deref()
            .unwrap_or(DEFAULT_UPLOAD_URL);

        self.agent
            .post(url)
            .header("Authorization", self.bearer())
            .header(
                "Content-Type",
                format!("multipart/related; boundary={BOUNDARY}"),
            )
            .send(&body[..])
            .map_err(|e| SyncError::Http {
                message: format!("remote storage upload failed: {e}"),
            })?;
        Ok(())
    }

    fn test_connection(&self) -> Result<(), SyncError> {
        let url = self.settings.probe_url.as_deref().unwrap_or(DEFAULT_PROBE_URL);
        self.agent
            .get(url)
            .header("Authorization", self.bearer())
            .call()
            .map_err(|e| SyncError::Http {
                message: format!("remote storage probe failed: {e}"),
            })?;
        Ok(())
    }
}

/// JSON metadata part followed by the file part, per RFC 2387.
fn multipart_related_body(metadata: &serde_json::Value, file: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(file.len() + 512);
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("--{BOUNDARY}\r\nContent-Type: {DOCX_MIME}\r\n\r\n").as_bytes());
    body.extend_from_slice(file);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_folder_and_token() {
        let settings = RemoteStorageSettings {
            folder_id: "folder".to_string(),
            access_token: String::new(),
            upload_url: None,
            probe_url: None,
        };
        assert!(matches!(
            RemoteStorageUploader::from_settings(&settings),
            Err(SyncError::NotConfigured { .. })
        ));
    }

    #[test]
    fn multipart_body_frames_metadata_and_file() {
        let metadata = serde_json::json!({"name": "r.docx"});
        let body = multipart_related_body(&metadata, b"DATA");
        let text = String::from_utf8(body).unwrap();

        assert!(text.starts_with(&format!("--{BOUNDARY}\r\n")));
        assert!(text.contains(r#"{"name":"r.docx"}"#));
        assert!(text.contains("\r\n\r\nDATA\r\n"));
        assert!(text.ends_with(&format!("--{BOUNDARY}--\r\n")));
        assert_eq!(text.matches(&format!("--{BOUNDARY}")).count(), 3);
    }
}
