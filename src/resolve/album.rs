//! Album host resolution: identifier extraction and API expansion.

use std::fmt;

use reqwest::{header, Client, StatusCode};
use url::Url;

use crate::api::types::AlbumImagesResponse;
use crate::config::AlbumHostConfig;
use crate::media::{kind_from_link, ResolvedMedia};

/// Path prefix of album share links.
pub const ALBUM_PREFIX: &str = "/a/";

/// Identifier lengths accepted after [`ALBUM_PREFIX`].
const PREFIXED_ID_LENGTHS: [usize; 2] = [5, 7];

/// Total path length of an unprefixed identifier path (`/` + 7 chars).
///
/// This equals `/a/` plus a 5-character id, so an unprefixed path of this
/// length cannot be told apart from a single-image link.
const UNPREFIXED_PATH_LENGTH: usize = ALBUM_PREFIX.len() + 5;

/// Opaque album identifier taken from a URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlbumId(String);

impl AlbumId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the album identifier from an album host URL.
///
/// - `/a/XXXXX` and `/a/XXXXXXX` yield the characters after the prefix.
/// - An unprefixed path of exactly `/a/` + 5 characters total yields
///   everything after the leading `/`.
/// - Any other shape yields nothing.
pub fn extract_album_id(url: &str) -> Option<AlbumId> {
    let parsed = Url::parse(url).ok()?;
    album_id_from_path(parsed.path())
}

fn album_id_from_path(path: &str) -> Option<AlbumId> {
    if let Some(id) = path.strip_prefix(ALBUM_PREFIX) {
        return PREFIXED_ID_LENGTHS
            .contains(&id.len())
            .then(|| AlbumId(id.to_string()));
    }

    if path.len() == UNPREFIXED_PATH_LENGTH {
        return path.strip_prefix('/').map(|id| AlbumId(id.to_string()));
    }

    None
}

/// Expands album identifiers through the host's album listing endpoint.
#[derive(Debug, Clone)]
pub struct AlbumResolver {
    client: Client,
    api_base: String,
    client_id: String,
}

impl AlbumResolver {
    pub fn new(client: Client, api_base: &str, client_id: &str) -> Self {
        let api_base = if api_base.ends_with('/') {
            api_base.to_string()
        } else {
            format!("{}/", api_base)
        };

        Self {
            client,
            api_base,
            client_id: client_id.to_string(),
        }
    }

    pub fn from_config(client: Client, config: &AlbumHostConfig) -> Self {
        Self::new(client, &config.api_base, &config.client_id)
    }

    /// Album listing endpoint for an identifier.
    pub fn endpoint(&self, id: &AlbumId) -> String {
        format!("{}album/{}/images", self.api_base, id)
    }

    /// Fetch the album and return one resolved item per listed image.
    ///
    /// `None` means the call failed (transport, non-200, or unparseable body);
    /// an album with no images is `Some` of an empty list.
    pub async fn expand(&self, id: &AlbumId) -> Option<Vec<ResolvedMedia>> {
        let url = self.endpoint(id);
        tracing::debug!("GET {}", url);

        let response = match self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, &self.client_id)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Album {} request failed: {}", id, e);
                return None;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!("Album {} returned HTTP {}, dropping", id, status);
            return None;
        }

        let album: AlbumImagesResponse = match response.json().await {
            Ok(album) => album,
            Err(e) => {
                tracing::debug!("Album {} response unreadable: {}", id, e);
                return None;
            }
        };

        let media: Vec<ResolvedMedia> = album
            .data
            .into_iter()
            .filter_map(|image| {
                let Some(link) = image.link else {
                    tracing::debug!("Album {} lists an image without a link, skipping", id);
                    return None;
                };
                let kind = kind_from_link(&link, image.mime_type.as_deref());
                Some(ResolvedMedia::new(link, kind))
            })
            .collect();

        tracing::debug!("Album {} expanded to {} items", id, media.len());
        Some(media)
    }
}
