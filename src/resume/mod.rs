pub mod confirm;
pub mod counter;
pub mod entry;
pub mod error;
pub mod reset;

pub use confirm::{AlwaysConfirm, Confirm, Prompt};
pub use counter::UploadCounter;
pub use entry::{ResumeEntry, Storage};
pub use error::ResetError;
pub use reset::{reset_uploads, ResetEntry, ResetOptions, ResetReport};
