// lib.rs - Library interface for the upload resetter

pub mod bencode;
pub mod config;
pub mod engine;
pub mod resume;
pub mod store;
pub mod utils;

// Re-export commonly used types for easier testing
pub use bencode::{decode_bencode, decode_document, encode_bvalue, BValue, BencodeError};
pub use config::Config;
pub use engine::{dump, run, RunOptions, RunOutcome};
pub use resume::{
    reset_uploads, AlwaysConfirm, Confirm, Prompt, ResetError, ResetOptions, ResetReport,
    UploadCounter,
};
pub use store::{StateFile, StoreError};
