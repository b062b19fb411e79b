//! Domain types exchanged with the CloudVault API.

pub mod expiration;
pub mod public;
pub mod session;
pub mod share;
pub mod timestamp;

pub use expiration::ExpirationOption;
pub use public::{PublicFile, PublicShareView};
pub use session::{Session, User};
pub use share::{FileId, ShareDetail, ShareExpiry, ShareSummary, SharedFile};
