//! Content-type probing of generic URLs.

use reqwest::{header, Client, StatusCode};

use crate::media::{is_hypertext, kind_from_content_type, ResolvedMedia};

/// Result of probing one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The URL serves a ready media kind.
    Ready(ResolvedMedia),
    /// The URL serves hypertext and goes back through classification.
    Reprocess(String),
    /// Non-200, unsupported content type, or transport failure.
    Dropped,
}

/// Issues one GET per URL and routes it by declared content type.
#[derive(Debug, Clone)]
pub struct ContentProbe {
    client: Client,
}

impl ContentProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Probe a URL. Only the status line and headers are read.
    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Probe of {} failed: {}", url, e);
                return ProbeOutcome::Dropped;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!("Probe of {} returned HTTP {}, dropping", url, status);
            return ProbeOutcome::Dropped;
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if let Some(kind) = kind_from_content_type(content_type) {
            tracing::debug!("{} is {}", url, kind);
            return ProbeOutcome::Ready(ResolvedMedia::new(url, kind));
        }

        if is_hypertext(content_type) {
            tracing::debug!("{} is hypertext, queued for reclassification", url);
            return ProbeOutcome::Reprocess(url.to_string());
        }

        tracing::debug!("{} has unsupported content type '{}'", url, content_type);
        ProbeOutcome::Dropped
    }
}
