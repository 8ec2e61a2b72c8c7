//! Video host resolution.

use reqwest::{Client, StatusCode};
use url::Url;

use crate::api::types::VideoLookupResponse;
use crate::config::VideoHostConfig;
use crate::media::{MediaKind, ResolvedMedia};

/// Resolves a video host page to its MP4 rendition.
#[derive(Debug, Clone)]
pub struct VideoResolver {
    client: Client,
    api_base: String,
}

impl VideoResolver {
    pub fn new(client: Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(client: Client, config: &VideoHostConfig) -> Self {
        Self::new(client, &config.api_base)
    }

    /// Lookup endpoint: the API base with the page's path appended.
    pub fn endpoint(&self, url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        Some(format!("{}{}", self.api_base, parsed.path()))
    }

    /// Resolve one video page. Any failure, including a response missing the
    /// item container or its video URL, yields `None`.
    pub async fn resolve(&self, url: &str) -> Option<ResolvedMedia> {
        let Some(endpoint) = self.endpoint(url) else {
            tracing::debug!("Cannot build video lookup for {}", url);
            return None;
        };
        tracing::debug!("GET {}", endpoint);

        let response = match self.client.get(&endpoint).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Video lookup for {} failed: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!("Video lookup for {} returned HTTP {}, dropping", url, status);
            return None;
        }

        let lookup: VideoLookupResponse = match response.json().await {
            Ok(lookup) => lookup,
            Err(e) => {
                tracing::debug!("Video lookup for {} unreadable: {}", url, e);
                return None;
            }
        };

        match lookup.item.and_then(|item| item.mp4_url) {
            Some(mp4_url) => Some(ResolvedMedia::new(mp4_url, MediaKind::VideoMp4)),
            None => {
                tracing::debug!("Video lookup for {} has no mp4 URL", url);
                None
            }
        }
    }
}
