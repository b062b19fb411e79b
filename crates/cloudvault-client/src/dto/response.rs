//! Response bodies that are not domain types.

use serde::Deserialize;

/// Body of a successful `POST /token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Bearer token.
    pub access_token: String,
    /// Token type, always `bearer` in practice.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Whether the user must change their password first.
    #[serde(default)]
    pub must_change_password: bool,
}

/// `{"message": "..."}` acknowledgements.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    /// Server message, if any.
    #[serde(default)]
    pub message: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
