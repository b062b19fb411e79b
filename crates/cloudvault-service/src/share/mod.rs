//! Dashboard flows: upload, share list and share detail.

pub mod detail;
pub mod list;
pub mod upload;

pub use detail::ShareDetailView;
pub use list::ShareListView;
pub use upload::{SettingsOutcome, UploadFlow, UploadReport, UploadSettings};
