//! Download module: persists resolved media to disk.
//!
//! This module provides:
//! - Download state tracking
//! - Per-user batch downloading
//! - Streaming single-file downloads

pub mod batch;
pub mod media;
pub mod state;

pub use batch::download_resolution;
pub use media::download_media_item;
pub use state::{DownloadState, GlobalState};
