//! Share management for the signed-in user.

use reqwest::Method;

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;
use cloudvault_core::types::{FileId, ShareDetail, ShareSummary};

use super::endpoint;
use crate::client::{ApiClient, RequestBody};
use crate::dto::{MessageResponse, ShareSettingsUpdate};
use crate::upload::{UploadFile, build_form};

impl ApiClient {
    /// Upload files into a new share.
    ///
    /// `POST /upload`, multipart.
    pub async fn upload_files(&self, files: &[UploadFile], token: &str) -> AppResult<ShareDetail> {
        ensure_files(files)?;
        let form = build_form(files)?;
        self.request(Method::POST, "/upload", RequestBody::Multipart(form), Some(token))
            .await
    }

    /// List the shares owned by the token's user.
    ///
    /// `GET /shares`.
    pub async fn list_shares(&self, token: &str) -> AppResult<Vec<ShareSummary>> {
        self.get_json("/shares", Some(token)).await
    }

    /// Fetch one share with its files.
    ///
    /// `GET /share/{id}`.
    pub async fn get_share(&self, public_id: &str, token: &str) -> AppResult<ShareDetail> {
        self.get_json(&endpoint(&["share", public_id]), Some(token))
            .await
    }

    /// Update password and/or expiration of a share.
    ///
    /// `POST /share/{id}`.
    pub async fn update_share_settings(
        &self,
        public_id: &str,
        update: &ShareSettingsUpdate,
        token: &str,
    ) -> AppResult<MessageResponse> {
        self.post_json(&endpoint(&["share", public_id]), update, Some(token))
            .await
    }

    /// Delete a share and its files.
    ///
    /// `DELETE /share/{id}`.
    pub async fn delete_share(&self, public_id: &str, token: &str) -> AppResult<MessageResponse> {
        self.delete_json(&endpoint(&["share", public_id]), Some(token))
            .await
    }

    /// Append files to an existing share. Returns the share with its full
    /// updated file list.
    ///
    /// `POST /share/{id}/files`, multipart.
    pub async fn add_files_to_share(
        &self,
        public_id: &str,
        files: &[UploadFile],
        token: &str,
    ) -> AppResult<ShareDetail> {
        ensure_files(files)?;
        let form = build_form(files)?;
        self.request(
            Method::POST,
            &endpoint(&["share", public_id, "files"]),
            RequestBody::Multipart(form),
            Some(token),
        )
        .await
    }

    /// Remove one file from a share.
    ///
    /// `DELETE /share/{id}/file/{fileId}`.
    pub async fn delete_file_from_share(
        &self,
        public_id: &str,
        file_id: FileId,
        token: &str,
    ) -> AppResult<MessageResponse> {
        let file_id = file_id.to_string();
        self.delete_json(&endpoint(&["share", public_id, "file", &file_id]), Some(token))
            .await
    }
}

fn ensure_files(files: &[UploadFile]) -> AppResult<()> {
    if files.is_empty() {
        return Err(AppError::validation("Select at least one file to upload"));
    }
    Ok(())
}
