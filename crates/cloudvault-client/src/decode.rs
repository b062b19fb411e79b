//! Response decoding shared by every API call.
//!
//! The rules live here and nowhere else:
//!
//! * a response whose `Content-Type` does not contain `application/json` is a
//!   failure, whatever its status, carrying the status and the first
//!   [`SNIPPET_LEN`] characters of the body;
//! * a non-success JSON response becomes an [`AppError`] whose message is the
//!   `detail` field, or a fallback;
//! * an error is token-expired when the status is 401 or the detail mentions
//!   `token`, `expired` or `unauthorized` (case-insensitive).

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;

/// How many characters of a non-JSON body are kept in the error message.
pub const SNIPPET_LEN: usize = 100;

const EXPIRY_MARKERS: [&str; 3] = ["token", "expired", "unauthorized"];

/// Message wording for one family of calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeContext {
    /// Leading text of the non-JSON error message.
    pub non_json_prefix: &'static str,
    /// Message used when an error body has no usable `detail`.
    pub fallback: &'static str,
}

impl DecodeContext {
    /// Plain JSON requests.
    pub const JSON: Self = Self {
        non_json_prefix: "Server returned non-JSON response",
        fallback: "API Request Failed",
    };

    /// Multipart uploads.
    pub const UPLOAD: Self = Self {
        non_json_prefix: "Upload failed with non-JSON response",
        fallback: "Upload Failed",
    };

    /// The credential exchange.
    pub const LOGIN: Self = Self {
        non_json_prefix: "Server returned non-JSON response",
        fallback: "Login failed",
    };
}

/// Decode a received response into `T`.
pub async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
    ctx: DecodeContext,
) -> AppResult<T> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = response.text().await?;
    decode_body(status, content_type.as_deref(), &body, ctx)
}

/// Decode an already-read response. Split out so the rules are testable
/// without a server.
pub fn decode_body<T: DeserializeOwned>(
    status: StatusCode,
    content_type: Option<&str>,
    body: &str,
    ctx: DecodeContext,
) -> AppResult<T> {
    let code = status.as_u16();

    if !is_json(content_type) {
        return Err(non_json_error(code, body, ctx));
    }

    let value: Value = serde_json::from_str(body).map_err(|e| {
        AppError::with_source(
            cloudvault_core::error::ErrorKind::InvalidResponse,
            format!("{} ({code}): {}...", ctx.non_json_prefix, snippet(body)),
            e,
        )
        .with_status(code)
        .with_token_expired(code == StatusCode::UNAUTHORIZED.as_u16())
    })?;

    if !status.is_success() {
        let message = detail_message(&value).unwrap_or_else(|| ctx.fallback.to_string());
        let expired = is_token_expired(code, &message);
        tracing::debug!(status = code, token_expired = expired, "API error response");
        return Err(AppError::api(code, message).with_token_expired(expired));
    }

    serde_json::from_value(value).map_err(AppError::from)
}

/// Token-expired classification of an error response.
pub fn is_token_expired(status: u16, detail: &str) -> bool {
    if status == StatusCode::UNAUTHORIZED.as_u16() {
        return true;
    }
    let lowered = detail.to_lowercase();
    EXPIRY_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Build the error for a response that is not JSON.
pub fn non_json_error(status: u16, body: &str, ctx: DecodeContext) -> AppError {
    AppError::invalid_response(
        status,
        format!("{} ({status}): {}...", ctx.non_json_prefix, snippet(body)),
    )
    .with_token_expired(status == StatusCode::UNAUTHORIZED.as_u16())
}

/// Whether a `Content-Type` value denotes JSON.
pub fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.contains("application/json"))
}

/// First [`SNIPPET_LEN`] characters of a body.
pub fn snippet(body: &str) -> &str {
    match body.char_indices().nth(SNIPPET_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

// `detail` is usually a string; validation failures send a list of
// `{loc, msg, type}` objects instead.
fn detail_message(value: &Value) -> Option<String> {
    match value.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null => None,
        Value::Array(items) => {
            let msgs: Vec<String> = items
                .iter()
                .map(|item| match item.get("msg").and_then(Value::as_str) {
                    Some(msg) => msg.to_string(),
                    None => item.to_string(),
                })
                .collect();
            if msgs.is_empty() { None } else { Some(msgs.join("; ")) }
        }
        other => Some(other.to_string()),
    }
}
