//! Submission listing client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::api::types::{Listing, Submission};
use crate::config::RedditConfig;
use crate::error::{Error, Result};

/// Upper bound on listing pages fetched for one user.
///
/// The listing API stops returning a cursor well before this.
const MAX_PAGES: usize = 100;

/// Produces the linked URLs of a user's submissions.
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    /// All submission URLs for `username`, newest first.
    async fn submissions(&self, username: &str) -> Result<Vec<String>>;
}

/// One page of a user's submissions.
#[derive(Debug, Default)]
pub struct SubmissionPage {
    pub urls: Vec<String>,
    pub after: Option<String>,
}

/// Reddit listing API client.
pub struct RedditClient {
    client: Client,
    api_base: String,
    page_size: u32,
}

impl RedditClient {
    pub fn new(client: Client, config: &RedditConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        }
    }

    /// Fetch one listing page.
    pub async fn get_page(&self, username: &str, after: Option<&str>) -> Result<SubmissionPage> {
        let url = format!("{}/user/{}/submitted.json", self.api_base, username);
        let limit = self.page_size.to_string();

        let mut query = vec![("limit", limit.as_str()), ("raw_json", "1")];
        if let Some(cursor) = after {
            query.push(("after", cursor));
        }

        tracing::debug!("GET {} after={:?}", url, after);

        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(Error::RateLimited(retry_after));
        }

        if !status.is_success() {
            return Err(Error::Listing(format!(
                "Failed to list submissions for {}: HTTP {}",
                username, status
            )));
        }

        let text = response.text().await?;
        let listing: Listing<Submission> = serde_json::from_str(&text).map_err(|e| {
            Error::Listing(format!(
                "Failed to parse listing: {} - Response: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })?;

        Ok(SubmissionPage {
            urls: listing
                .data
                .children
                .into_iter()
                .filter_map(|thing| thing.data.url)
                .collect(),
            after: listing.data.after,
        })
    }
}

#[async_trait]
impl SubmissionSource for RedditClient {
    async fn submissions(&self, username: &str) -> Result<Vec<String>> {
        let mut urls = Vec::new();
        let mut cursor: Option<String> = None;

        for page_number in 1..=MAX_PAGES {
            let page = self.get_page(username, cursor.as_deref()).await?;
            tracing::debug!(
                "Listing page {} for {}: {} submissions",
                page_number,
                username,
                page.urls.len()
            );
            urls.extend(page.urls);

            match page.after {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        tracing::debug!("Listed {} submissions for {}", urls.len(), username);
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::client::build_client;

    fn reddit_client(server: &MockServer) -> RedditClient {
        let config = RedditConfig {
            api_base: server.uri(),
            ..RedditConfig::default()
        };
        RedditClient::new(
            build_client("picrip-test", Duration::from_secs(5)).unwrap(),
            &config,
        )
    }

    fn page(urls: &[&str], after: Option<&str>) -> serde_json::Value {
        let children: Vec<_> = urls
            .iter()
            .map(|u| serde_json::json!({"kind": "t3", "data": {"url": u}}))
            .collect();
        serde_json::json!({"kind": "Listing", "data": {"after": after, "children": children}})
    }

    #[tokio::test]
    async fn test_follows_pagination_cursor() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/someone/submitted.json"))
            .and(query_param_is_missing("after"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(page(&["https://a/1", "https://a/2"], Some("t3_2"))),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user/someone/submitted.json"))
            .and(query_param("after", "t3_2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(&["https://a/3"], None)))
            .expect(1)
            .mount(&server)
            .await;

        let urls = reddit_client(&server).submissions("someone").await.unwrap();
        assert_eq!(urls, vec!["https://a/1", "https://a/2", "https://a/3"]);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = reddit_client(&server)
            .submissions("ghost_user")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UserNotFound(name) if name == "ghost_user"));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let err = reddit_client(&server).submissions("someone").await.unwrap_err();
        assert!(matches!(err, Error::RateLimited(7)));
    }

    #[tokio::test]
    async fn test_malformed_listing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let err = reddit_client(&server).submissions("someone").await.unwrap_err();
        assert!(matches!(err, Error::Listing(_)));
    }
}
