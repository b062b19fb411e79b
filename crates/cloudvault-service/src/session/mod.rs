//! Session lifecycle and persistence.

pub mod context;
pub mod store;

pub use context::{LogoutReason, SessionContext};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
