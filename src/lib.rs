//! picrip - resolve and download media linked from Reddit submissions.
//!
//! Submission URLs are untyped: some point straight at an image or video,
//! some at an HTML page on an album or video host. This library turns them
//! into a list of downloadable media URLs.
//!
//! # Features
//!
//! - Content-type probing of generic links
//! - Imgur album expansion
//! - Gfycat MP4 lookup
//! - Wave-based concurrent resolution with an optional concurrency limit
//! - Paginated Reddit submission listing
//! - Streaming downloads with per-user statistics
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use picrip::{api::client_from_config, Config, ResolutionPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let client = client_from_config(&config)?;
//!     let pipeline = ResolutionPipeline::from_config(client, &config);
//!
//!     let resolution = pipeline
//!         .run(vec!["https://i.imgur.com/AbCdEfG.jpg".to_string()])
//!         .await;
//!     for item in &resolution.media {
//!         println!("{} {}", item.kind, item.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod resolve;

// Re-exports for convenience
pub use api::{RedditClient, SubmissionSource};
pub use config::Config;
pub use download::{download_resolution, DownloadState, GlobalState};
pub use error::{Error, Result};
pub use media::{MediaKind, ResolvedMedia};
pub use resolve::{Category, Classifier, Resolution, ResolutionPipeline};
