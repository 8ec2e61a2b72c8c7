//! Filesystem module.
//!
//! Provides:
//! - Per-user download folders
//! - Filename generation and sanitization

pub mod naming;
pub mod paths;

pub use naming::{filename_for, sanitize_filename, sanitize_path_component};
pub use paths::get_user_folder;
