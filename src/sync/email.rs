use super::config::EmailSettings;
use super::{read_report, report_filename, SyncMethod, Uploader, DOCX_MIME};
use crate::error::SyncError;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::fmt::Display;
use std::path::Path;

/// Mails the report as an attachment to every configured recipient.
pub struct EmailUploader {
    settings: EmailSettings,
}

impl EmailUploader {
    pub fn from_settings(settings: &EmailSettings) -> Result<Self, SyncError> {
        let reason = if settings.smtp_host.trim().is_empty() {
            Some("missing SMTP host")
        } else if settings.recipients.is_empty() {
            Some("no recipients")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(SyncError::NotConfigured {
                transport: SyncMethod::Email.to_string(),
                reason: reason.to_string(),
            });
        }
        Ok(Self {
            settings: settings.clone(),
        })
    }

    fn transport(&self) -> Result<SmtpTransport, SyncError> {
        let mut builder = SmtpTransport::starttls_relay(&self.settings.smtp_host)
            .map_err(email_error)?
            .port(self.settings.smtp_port);
        if !self.settings.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                self.settings.username.clone(),
                self.settings.password.clone(),
            ));
        }
        Ok(builder.build())
    }

    fn build_message(&self, path: &Path, project_name: &str) -> Result<Message, SyncError> {
        let sender = if self.settings.from.is_empty() {
            &self.settings.username
        } else {
            &self.settings.from
        };
        let from = sender.parse::<Mailbox>().map_err(email_error)?;

        let mut builder = Message::builder()
            .from(from)
            .subject(format!("Отчёт об обследовании: {project_name}"));
        for recipient in &self.settings.recipients {
            builder = builder.to(recipient.parse::<Mailbox>().map_err(email_error)?);
        }

        let filename = report_filename(path);
        let content_type = ContentType::parse(DOCX_MIME).map_err(email_error)?;
        let attachment = Attachment::new(filename.clone()).body(read_report(path)?, content_type);
        let text = format!("Проект: {project_name}\nФайл отчёта: {filename}\n");

        builder
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(text))
                    .singlepart(attachment),
            )
            .map_err(email_error)
    }
}

impl Uploader for EmailUploader {
    fn method(&self) -> SyncMethod {
        SyncMethod::Email
    }

    fn upload(&self, path: &Path, project_name: &str) -> Result<(), SyncError> {
        let message = self.build_message(path, project_name)?;
        self.transport()?.send(&message).map_err(email_error)?;
        Ok(())
    }

    fn test_connection(&self) -> Result<(), SyncError> {
        if self.transport()?.test_connection().map_err(email_error)? {
            Ok(())
        } else {
            Err(email_error("SMTP server did not accept the connection"))
        }
    }
}

fn email_error(e: impl Display) -> SyncError {
    SyncError::Email {
        message: e.to_string(),
    }
}
