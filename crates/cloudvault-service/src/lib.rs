//! # cloudvault-service
//!
//! The view/flow layer of the CloudVault client. Holds the session context
//! and the per-screen state machines (login, forced password change,
//! upload, share list, share detail, public unlock), each driven by the
//! HTTP client from `cloudvault-client`.

pub mod auth;
pub mod context;
pub mod public;
pub mod routing;
pub mod session;
pub mod share;

pub use context::AppContext;
pub use routing::{Route, RouteDecision, Screen};
pub use session::{LogoutReason, SessionContext};
