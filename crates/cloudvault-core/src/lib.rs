//! # cloudvault-core
//!
//! Core crate for the CloudVault client. Contains configuration schemas,
//! the domain types exchanged with the CloudVault API (sessions, shares,
//! public share views), and the unified error system.
//!
//! This crate has **no** internal dependencies on other CloudVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
