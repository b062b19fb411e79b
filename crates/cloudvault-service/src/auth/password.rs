//! Local checks on a new password before it is sent.

use cloudvault_core::error::AppError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validates the new-password form.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    /// Minimum password length in characters.
    min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl PasswordPolicy {
    /// Create a policy with a custom minimum length.
    pub fn with_min_length(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Check the new password and its confirmation.
    ///
    /// The mismatch check runs first, matching the order the form reports
    /// errors in.
    pub fn validate(&self, new_password: &str, confirm_password: &str) -> Result<(), AppError> {
        if new_password != confirm_password {
            return Err(AppError::validation("New passwords do not match"));
        }

        if new_password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        Ok(())
    }
}
