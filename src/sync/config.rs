//! Sync configuration.
//!
//! Stored as JSON. Secrets can be overridden from the environment, which
//! takes precedence over the file:
//! `WEAR_SYNC_FTP_PASSWORD`, `WEAR_SYNC_EMAIL_PASSWORD`,
//! `WEAR_SYNC_WEBHOOK_TOKEN`, `WEAR_SYNC_REMOTE_TOKEN`.

use crate::error::SyncError;
use crate::export::write_atomically;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Upload transport selected in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMethod {
    #[default]
    Ftp,
    Email,
    Webhook,
    #[serde(alias = "google_drive")]
    RemoteStorage,
}

impl SyncMethod {
    pub const ALL: [SyncMethod; 4] = [Self::Ftp, Self::Email, Self::Webhook, Self::RemoteStorage];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ftp => "ftp",
            Self::Email => "email",
            Self::Webhook => "webhook",
            Self::RemoteStorage => "remote_storage",
        }
    }
}

impl fmt::Display for SyncMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ftp" => Ok(Self::Ftp),
            "email" | "smtp" => Ok(Self::Email),
            "webhook" | "http" => Ok(Self::Webhook),
            "remote_storage" | "google_drive" => Ok(Self::RemoteStorage),
            other => Err(format!("unknown sync method '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FtpSettings {
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_ftp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub remote_dir: String,
}

fn default_ftp_port() -> u16 {
    21
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSettings {
    #[serde(default)]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub recipients: Vec<String>,
}

fn default_smtp_port() -> u16 {
    587
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// Drive-style remote storage. The access token is issued elsewhere and
/// handed in ready to use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteStorageSettings {
    #[serde(default)]
    pub folder_id: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub probe_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub sync_method: SyncMethod,
    #[serde(default)]
    pub auto_sync: bool,
    #[serde(default = "default_schedule")]
    pub sync_schedule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ftp: Option<FtpSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<WebhookSettings>,
    #[serde(default, alias = "google_drive", skip_serializing_if = "Option::is_none")]
    pub remote_storage: Option<RemoteStorageSettings>,
}

fn default_schedule() -> String {
    "manual".to_string()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            sync_method: SyncMethod::default(),
            auto_sync: false,
            sync_schedule: default_schedule(),
            ftp: None,
            email: None,
            webhook: None,
            remote_storage: None,
        }
    }
}

impl SyncConfig {
    /// Loads the config from the default location, falling back to the
    /// disabled default when no file exists.
    pub fn load() -> Result<Self, SyncError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => {
                let mut config = Self::default();
                config.apply_env_overrides();
                Ok(config)
            }
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SyncError> {
        let content = std::fs::read_to_string(path).map_err(|source| SyncError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: SyncConfig =
            serde_json::from_str(&content).map_err(|source| SyncError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), SyncError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SyncError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        write_atomically(path, json.as_bytes()).map_err(|source| SyncError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/wear-inspector/sync.json`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("wear-inspector").join("sync.json"))
    }

    #[must_use]
    pub fn is_configured(&self, method: SyncMethod) -> bool {
        match method {
            SyncMethod::Ftp => self.ftp.is_some(),
            SyncMethod::Email => self.email.is_some(),
            SyncMethod::Webhook => self.webhook.is_some(),
            SyncMethod::RemoteStorage => self.remote_storage.is_some(),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Overrides secrets of configured transports using `lookup`.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(ftp) = self.ftp.as_mut() {
            if let Some(password) = lookup("WEAR_SYNC_FTP_PASSWORD") {
                ftp.password = password;
            }
        }
        if let Some(email) = self.email.as_mut() {
            if let Some(password) = lookup("WEAR_SYNC_EMAIL_PASSWORD") {
                email.password = password;
            }
        }
        if let Some(webhook) = self.webhook.as_mut() {
            if let Some(token) = lookup("WEAR_SYNC_WEBHOOK_TOKEN") {
                webhook.token = Some(token);
            }
        }
        if let Some(remote) = self.remote_storage.as_mut() {
            if let Some(token) = lookup("WEAR_SYNC_REMOTE_TOKEN") {
                remote.access_token = token;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_disabled_default() {
        let config: SyncConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SyncConfig::default());
        assert!(!config.enabled);
        assert_eq!(config.sync_schedule, "manual");
    }

    #[test]
    fn parses_documented_layout() {
        let config: SyncConfig = serde_json::from_str(
            r#"{
                "enabled": true,
                "sync_method": "google_drive",
                "auto_sync": true,
                "sync_schedule": "daily",
                "ftp": {"host": "ftp.example.com", "username": "inspector"},
                "google_drive": {"folder_id": "abc", "access_token": "tok"}
            }"#,
        )
        .unwrap();

        assert_eq!(config.sync_method, SyncMethod::RemoteStorage);
        assert_eq!(config.ftp.as_ref().unwrap().port, 21);
        assert_eq!(config.remote_storage.as_ref().unwrap().folder_id, "abc");
        assert!(config.is_configured(SyncMethod::Ftp));
        assert!(!config.is_configured(SyncMethod::Email));
        assert!(!config.is_configured(SyncMethod::Webhook));
    }

    #[test]
    fn overrides_only_touch_configured_transports() {
        let mut config = SyncConfig {
            webhook: Some(WebhookSettings {
                url: "https://hooks.example.com".to_string(),
                token: None,
            }),
            ..SyncConfig::default()
        };
        config.apply_overrides_from(|key| match key {
            "WEAR_SYNC_WEBHOOK_TOKEN" => Some("secret".to_string()),
            "WEAR_SYNC_FTP_PASSWORD" => Some("ignored".to_string()),
            _ => None,
        });

        assert_eq!(config.webhook.unwrap().token.as_deref(), Some("secret"));
        assert!(config.ftp.is_none());
    }

    #[test]
    fn save_and_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync.json");
        let config = SyncConfig {
            enabled: true,
            sync_method: SyncMethod::Email,
            email: Some(EmailSettings {
                smtp_host: "smtp.example.com".to_string(),
                smtp_port: 2525,
                username: String::new(),
                password: String::new(),
                from: "inspector@example.com".to_string(),
                recipients: vec!["office@example.com".to_string()],
            }),
            ..SyncConfig::default()
        };
        config.save(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"sync_method\": \"email\""));

        let mut loaded = SyncConfig::load_from_file(&path).unwrap();
        // Environment may carry an override; compare the stable part.
        if let Some(email) = loaded.email.as_mut() {
            email.password = String::new();
        }
        assert_eq!(loaded, config);
    }

    #[test]
    fn malformed_file_keeps_parse_cause() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync.json");
        std::fs::write(&path, r#"{"enabled": "yes"}"#).unwrap();

        match SyncConfig::load_from_file(&path) {
            Err(SyncError::Json {
                path: reported,
                source,
            }) => {
                assert_eq!(reported, path);
                assert!(source.is_data());
            }
            other => panic!("expected a JSON error, got {other:?}"),
        }
    }

    #[test]
    fn method_names_parse() {
        assert_eq!("SMTP".parse::<SyncMethod>(), Ok(SyncMethod::Email));
        assert_eq!("google_drive".parse::<SyncMethod>(), Ok(SyncMethod::RemoteStorage));
        assert!("carrier-pigeon".parse::<SyncMethod>().is_err());
    }
}
