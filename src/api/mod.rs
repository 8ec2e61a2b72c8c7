//! HTTP-facing module.
//!
//! This module provides:
//! - The shared HTTP transport
//! - Submission listing (the pipeline's input)
//! - Response types for the listing and host APIs

pub mod client;
pub mod reddit;
pub mod types;

pub use client::{
    build_client, build_download_client, client_from_config, download_client_from_config,
};
pub use reddit::{RedditClient, SubmissionPage, SubmissionSource};
pub use types::*;
