mod display;

pub use display::{display_text, format_gigabytes};
