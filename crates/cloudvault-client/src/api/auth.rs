//! Credential exchange and password change.

use reqwest::Method;

use cloudvault_core::result::AppResult;

use crate::client::{ApiClient, RequestBody};
use crate::decode::DecodeContext;
use crate::dto::{ChangePasswordRequest, MessageResponse, TokenResponse};

impl ApiClient {
    /// Exchange a username and password for a bearer token.
    ///
    /// `POST /token`, form-encoded.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        let form = vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];
        self.request_with(
            Method::POST,
            "/token",
            RequestBody::Form(form),
            None,
            DecodeContext::LOGIN,
        )
        .await
    }

    /// Change the password of the session the token belongs to.
    ///
    /// `POST /change-password`.
    pub async fn change_password(
        &self,
        new_password: &str,
        token: &str,
    ) -> AppResult<MessageResponse> {
        let body = ChangePasswordRequest {
            new_password: new_password.to_string(),
        };
        self.post_json("/change-password", &body, Some(token)).await
    }
}
