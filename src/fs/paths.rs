//! Path and directory management.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::fs::naming::sanitize_path_component;

/// Folder that receives a user's media.
pub fn get_user_folder(config: &Config, username: &str) -> Result<PathBuf> {
    let folder = sanitize_path_component(username)?;
    Ok(config.download_directory().join(folder))
}
