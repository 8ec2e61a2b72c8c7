//! URL resolution.
//!
//! Submission URLs are untyped; this module turns them into
//! [`ResolvedMedia`](crate::media::ResolvedMedia) items:
//!
//! - [`Classifier`] routes a URL by host, without network access
//! - [`ContentProbe`] fetches a generic URL and inspects its content type
//! - [`AlbumResolver`] expands album identifiers through the album host API
//! - [`VideoResolver`] looks up the MP4 rendition of a video host page
//! - [`ResolutionPipeline`] runs them as sequential, internally concurrent waves

pub mod album;
pub mod classify;
pub mod pipeline;
pub mod probe;
pub mod video;

pub use album::{extract_album_id, AlbumId, AlbumResolver};
pub use classify::{Category, ClassifiedUrl, Classifier};
pub use pipeline::{
    PendingReprocess, Resolution, ResolutionPipeline, ResolutionStats, Resolvers, Wave, MAX_PASSES,
};
pub use probe::{ContentProbe, ProbeOutcome};
pub use video::VideoResolver;
