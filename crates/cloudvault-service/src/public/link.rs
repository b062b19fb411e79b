//! Turning what a recipient pastes into a public share id.

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;

use crate::routing::Route;

/// Extract the public id from a share link, a route path or a bare id.
///
/// Accepts `http://host/share/<id>`, `http://host/download/<id>`,
/// `/share/<id>`, `/download/<id>` and `<id>`.
pub fn parse_share_reference(input: &str) -> AppResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AppError::validation("Share link or id is required"));
    }

    let path = match input.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |idx| &rest[idx..]),
        None if input.starts_with('/') => input,
        None if !input.contains(['/', '?', '#']) => return Ok(input.to_string()),
        None => input,
    };

    Route::parse(path)
        .public_id()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::validation(format!("Not a share link or id: {input}")))
}
