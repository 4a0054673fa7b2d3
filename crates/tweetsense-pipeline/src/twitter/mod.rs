//! HTTP client for the Twitter v1.1 search API.
//!
//! Requests are signed with OAuth 1.0a user-context credentials. Only the
//! first page of `search/tweets.json` is read.

mod oauth;

use std::time::Duration;

use reqwest::{header::AUTHORIZATION, Client, Url};
use serde::Deserialize;
use tweetsense_core::TwitterCredentials;

use crate::error::PipelineError;
use crate::services::TweetSearch;
use crate::types::Post;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/1.1/";

#[derive(Deserialize)]
struct SearchResponse {
    statuses: Vec<Post>,
}

/// Client for the Twitter search API.
///
/// Use [`TwitterClient::new`] for production or
/// [`TwitterClient::with_base_url`] to point at a mock server in tests.
pub struct TwitterClient {
    client: Client,
    credentials: TwitterCredentials,
    base_url: Url,
}

impl TwitterClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(credentials: TwitterCredentials, timeout_secs: u64) -> Result<Self, PipelineError> {
        Self::with_base_url(credentials, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`PipelineError::InvalidUrl`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        credentials: TwitterCredentials,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tweetsense/0.1")
            .build()?;

        // Exactly one trailing slash so `join` appends rather than replaces
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| PipelineError::InvalidUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            credentials,
            base_url,
        })
    }

    fn search_url(&self) -> Result<Url, PipelineError> {
        self.base_url
            .join("search/tweets.json")
            .map_err(|e| PipelineError::InvalidUrl(format!("search endpoint: {e}")))
    }

    /// Searches tweets and returns the `statuses` of the first result page.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Http`] on network failure.
    /// - [`PipelineError::TwitterApi`] on a non-2xx status.
    /// - [`PipelineError::Deserialize`] if the body lacks a `statuses` list.
    pub async fn search_tweets(&self, query: &str) -> Result<Vec<Post>, PipelineError> {
        let mut url = self.search_url()?;
        let signing_url = url.to_string();
        url.set_query(Some(&format!("q={}", oauth::encode(query))));

        let params = [("q".to_string(), query.to_string())];
        let authorization = oauth::authorization_header(
            &self.credentials,
            "GET",
            &signing_url,
            &params,
            &oauth::OAuthParams::generate(),
        )?;

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(PipelineError::TwitterApi {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: SearchResponse =
            serde_json::from_str(&body).map_err(|e| PipelineError::Deserialize {
                context: format!("search/tweets(q={query})"),
                source: e,
            })?;

        Ok(envelope.statuses)
    }
}

impl TweetSearch for TwitterClient {
    async fn search(&self, query: &str) -> Result<Vec<Post>, PipelineError> {
        self.search_tweets(query).await
    }
}
