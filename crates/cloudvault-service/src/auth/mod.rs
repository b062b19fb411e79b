//! Sign-in, sign-out and password change.

pub mod password;
pub mod service;

pub use password::PasswordPolicy;
pub use service::{change_password, login, logout};
