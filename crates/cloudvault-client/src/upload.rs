//! Files queued for a multipart upload.

use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;

/// Multipart field name the API reads files from.
pub const FILES_FIELD: &str = "files";

/// One file to send in a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name reported to the server.
    pub filename: String,
    /// File contents.
    pub content: Bytes,
    /// MIME type of the part.
    pub mime_type: String,
}

impl UploadFile {
    /// Create an upload from in-memory contents, guessing the MIME type
    /// from the file name.
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let filename = filename.into();
        let mime_type = mime_guess::from_path(&filename)
            .first_or_octet_stream()
            .to_string();
        Self {
            filename,
            content: content.into(),
            mime_type,
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::validation(format!("Not a file path: {}", path.display()))
            })?
            .to_string();

        let content = tokio::fs::read(path).await.map_err(|e| {
            AppError::with_source(
                cloudvault_core::error::ErrorKind::Storage,
                format!("Failed to read {}: {e}", path.display()),
                e,
            )
        })?;

        Ok(Self::new(filename, content))
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Whether the file is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Build the multipart form for a batch of files, one `files` part each.
pub fn build_form(files: &[UploadFile]) -> AppResult<Form> {
    files.iter().try_fold(Form::new(), |form, file| {
        let part = Part::bytes(file.content.to_vec())
            .file_name(file.filename.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| {
                AppError::validation(format!(
                    "Invalid MIME type '{}' for {}: {e}",
                    file.mime_type, file.filename
                ))
            })?;
        Ok(form.part(FILES_FIELD, part))
    })
}
