//! Anonymous access to shares through their public link.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::Method;
use tokio::io::AsyncWriteExt;

use cloudvault_core::error::{AppError, ErrorKind};
use cloudvault_core::result::AppResult;
use cloudvault_core::types::{PublicFile, PublicShareView};

use super::endpoint;
use crate::client::{ApiClient, RequestBody};
use crate::decode::{self, DecodeContext};
use crate::dto::UnlockRequest;

impl ApiClient {
    /// Fetch the lock status of a share, with its files when unlocked.
    ///
    /// `GET /public/share/{id}`.
    pub async fn get_public_share(&self, public_id: &str) -> AppResult<PublicShareView> {
        self.get_json(&endpoint(&["public", "share", public_id]), None)
            .await
    }

    /// Submit a password for a locked share.
    ///
    /// `POST /public/share/{id}/unlock`.
    pub async fn unlock_share(&self, public_id: &str, password: &str) -> AppResult<PublicShareView> {
        let body = UnlockRequest {
            password: password.to_string(),
        };
        self.post_json(&endpoint(&["public", "share", public_id, "unlock"]), &body, None)
            .await
    }

    /// Direct link for a file's download token.
    pub fn download_url(&self, file: &PublicFile) -> String {
        self.public_url(&endpoint(&["public", "file", &file.download_token]))
    }

    /// Stream a public file into `dest_dir`, named after the listed filename.
    ///
    /// `GET /public/file/{token}`. The body is raw file bytes, so it bypasses
    /// JSON decoding; only a failed status is decoded as an API error.
    pub async fn download_public_file(
        &self,
        file: &PublicFile,
        dest_dir: &Path,
    ) -> AppResult<PathBuf> {
        let response = self
            .send(
                Method::GET,
                &endpoint(&["public", "file", &file.download_token]),
                RequestBody::Empty,
                None,
            )
            .await?;

        if !response.status().is_success() {
            let err = match decode::decode_response::<serde_json::Value>(response, DecodeContext::JSON)
                .await
            {
                Err(err) => err,
                Ok(_) => AppError::internal("Download failed"),
            };
            return Err(err);
        }

        let target = dest_dir.join(safe_file_name(&file.filename));
        let written = save_stream(response.bytes_stream(), &target).await?;

        tracing::info!(file = %file.filename, bytes = written, "Downloaded public file");
        Ok(target)
    }
}

/// Write a byte stream to `target`. A partially written file is removed
/// when the stream or a write fails.
pub async fn save_stream<S, E>(stream: S, target: &Path) -> AppResult<u64>
where
    S: Stream<Item = Result<Bytes, E>>,
    AppError: From<E>,
{
    let mut out = tokio::fs::File::create(target).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to create {}: {e}", target.display()),
            e,
        )
    })?;

    let mut stream = std::pin::pin!(stream);
    let copied: AppResult<u64> = async {
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            out.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        out.flush().await?;
        Ok(written)
    }
    .await;

    if copied.is_err() {
        drop(out);
        if let Err(e) = tokio::fs::remove_file(target).await {
            tracing::warn!(path = %target.display(), error = %e, "Failed to remove partial download");
        }
    }
    copied
}

/// Last path component of a server-supplied name, so a download can never
/// escape the destination directory.
pub fn safe_file_name(name: &str) -> String {
    let candidate = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    match candidate {
        "" | "." | ".." => "download".to_string(),
        other => other.to_string(),
    }
}
