//! Configuration module for picrip.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{AlbumHostConfig, Config, OptionsConfig, RedditConfig, TargetsConfig, VideoHostConfig};
pub use validation::{strip_user_prefix, validate_config};
