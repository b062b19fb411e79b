//! Interactive prompts.

use cloudvault_core::error::AppError;
use cloudvault_core::result::AppResult;

/// Use `value` when given, otherwise ask for it.
pub fn text_or_prompt(value: Option<&str>, prompt: &str) -> AppResult<String> {
    match value {
        Some(v) => Ok(v.to_string()),
        None => dialoguer::Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}"))),
    }
}

/// Use `value` when given, otherwise ask for it without echo.
pub fn password_or_prompt(value: Option<&str>, prompt: &str) -> AppResult<String> {
    match value {
        Some(v) => Ok(v.to_string()),
        None => password(prompt),
    }
}

/// Ask for a password without echo.
pub fn password(prompt: &str) -> AppResult<String> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

/// Yes/no question defaulting to no. A failed prompt counts as no.
pub fn confirm(prompt: &str) -> bool {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Confirmation prompt failed");
            false
        })
}
