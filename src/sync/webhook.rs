use super::config::WebhookSettings;
use super::{read_report, report_filename, SyncMethod, Uploader, DOCX_MIME};
use crate::error::SyncError;
use std::path::Path;

/// POSTs the raw report bytes to an HTTP endpoint.
pub struct WebhookUploader {
    settings: WebhookSettings,
    agent: ureq::Agent,
}

impl WebhookUploader {
    pub fn from_settings(settings: &WebhookSettings) -> Result<Self, SyncError> {
        if settings.url.trim().is_empty() {
            return Err(SyncError::NotConfigured {
                transport: SyncMethod::Webhook.to_string(),
                reason: "missing URL".to_string(),
            });
        }
        Ok(Self {
            settings: settings.clone(),
            agent: ureq::Agent::new_with_defaults(),
        })
    }
}

impl Uploader for WebhookUploader {
    fn method(&self) -> SyncMethod {
        SyncMethod::Webhook
    }

    fn upload(&self, path: &Path, project_name: &str) -> Result<(), SyncError> {
        let bytes = read_report(path)?;
        let mut request = self
            .agent
            .post(self.settings.url.as_str())
            .query("project", project_name)
            .query("filename", report_filename(path))
            .header("Content-Type", DOCX_MIME);
        if let Some(token) = &self.settings.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        request.send(&bytes[..]).map_err(|e| SyncError::Http {
            message: format!("webhook upload failed: {e}"),
        })?;
        Ok(())
    }

    // Unauthenticated GET; any 2xx/3xx answer counts as reachable.
    fn test_connection(&self) -> Result<(), SyncError> {
        self.agent
            .get(self.settings.url.as_str())
            .call()
            .map_err(|e| SyncError::Http {
                message: format!("webhook probe failed: {e}"),
            })?;
        Ok(())
    }
}
