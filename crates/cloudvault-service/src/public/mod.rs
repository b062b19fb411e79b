//! Public share access through a link, no session involved.

pub mod link;
pub mod unlock;

pub use link::parse_share_reference;
pub use unlock::{PublicShareFlow, UnlockState};
