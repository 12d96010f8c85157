use super::config::FtpSettings;
use super::{report_filename, SyncMethod, Uploader};
use crate::error::SyncError;
use std::fs::File;
use std::path::Path;
use suppaftp::{FtpError, FtpStream};
use tracing::debug;

const ANONYMOUS_USER: &str = "anonymous";

/// Uploads reports into `<remote_dir>/<project>/` on an FTP server.
pub struct FtpUploader {
    settings: FtpSettings,
}

impl FtpUploader {
    pub fn from_settings(settings: &FtpSettings) -> Result<Self, SyncError> {
        if settings.host.trim().is_empty() {
            return Err(SyncError::NotConfigured {
                transport: SyncMethod::Ftp.to_string(),
                reason: "missing host".to_string(),
            });
        }
        Ok(Self {
            settings: settings.clone(),
        })
    }

    fn connect(&self) -> Result<FtpStream, SyncError> {
        let address = format!("{}:{}", self.settings.host, self.settings.port);
        let mut ftp = FtpStream::connect(address)?;

        let user = if self.settings.username.is_empty() {
            ANONYMOUS_USER
        } else {
            self.settings.username.as_str()
        };
        ftp.login(user, self.settings.password.as_str())?;
        Ok(ftp)
    }
}

impl Uploader for FtpUploader {
    fn method(&self) -> SyncMethod {
        SyncMethod::Ftp
    }

    fn upload(&self, path: &Path, project_name: &str) -> Result<(), SyncError> {
        let mut file = File::open(path).map_err(|source| SyncError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut ftp = self.connect()?;
        if !self.settings.remote_dir.is_empty() {
            ftp.cwd(self.settings.remote_dir.as_str())?;
        }

        let project_dir = project_dir_name(project_name);
        if !project_dir.is_empty() {
            // Already existing directories make mkdir fail; cwd decides.
            if let Err(e) = ftp.mkdir(project_dir.as_str()) {
                debug!(dir = %project_dir, error = %e, "mkdir skipped");
            }
            ftp.cwd(project_dir.as_str())?;
        }

        let filename = report_filename(path);
        let stored = ftp.put_file(filename.as_str(), &mut file);
        let bytes = settle_upload(stored, ftp.quit())?;
        debug!(filename = %filename, bytes, "ftp upload complete");
        Ok(())
    }

    fn test_connection(&self) -> Result<(), SyncError> {
        let mut ftp = self.connect()?;
        ftp.quit()?;
        Ok(())
    }
}

/// The store result decides the outcome; once the file is on the server a
/// failed QUIT is only logged.
fn settle_upload(stored: Result<u64, FtpError>, quit: Result<(), FtpError>) -> Result<u64, SyncError> {
    let bytes = stored?;
    if let Err(e) = quit {
        debug!(error = %e, "quit after upload failed");
    }
    Ok(bytes)
}

fn project_dir_name(project_name: &str) -> String {
    project_name
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect()
}
