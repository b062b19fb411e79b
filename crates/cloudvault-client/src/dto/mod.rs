//! Wire shapes that only exist at the HTTP boundary.

pub mod request;
pub mod response;

pub use request::{ChangePasswordRequest, ShareSettingsUpdate, UnlockRequest};
pub use response::{MessageResponse, TokenResponse};
