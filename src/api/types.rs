//! API response type definitions.

use serde::Deserialize;

/// Album listing response: `{ "data": [ { "link": ... }, ... ] }`.
#[derive(Debug, Deserialize)]
pub struct AlbumImagesResponse {
    #[serde(default)]
    pub data: Vec<AlbumImage>,
}

/// One image of an album.
///
/// `link` is optional so that one broken element is skipped without
/// losing the rest of the album.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumImage {
    pub link: Option<String>,

    /// Declared MIME type, when the host provides one.
    #[serde(rename = "type")]
    pub mime_type: Option<String>,
}

/// Video lookup response: `{ "gfyItem": { "mp4Url": ... } }`.
///
/// Both levels are optional so a missing field is a drop, not a parse error.
#[derive(Debug, Deserialize)]
pub struct VideoLookupResponse {
    #[serde(rename = "gfyItem")]
    pub item: Option<VideoItem>,
}

/// The item container of a video lookup.
#[derive(Debug, Deserialize)]
pub struct VideoItem {
    #[serde(rename = "mp4Url")]
    pub mp4_url: Option<String>,
}

/// Generic listing wrapper.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

/// Listing page contents and pagination cursor.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListingData<T> {
    #[serde(default)]
    pub children: Vec<Thing<T>>,
    pub after: Option<String>,
}

/// A listing child.
#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    pub data: T,
}

/// The submission fields we read.
#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    /// Linked URL; self posts link to their own permalink.
    pub url: Option<String>,
}
