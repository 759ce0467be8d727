//! Feed fetcher backed by reqwest and feed-rs.
//!
//! Fetches RSS/Atom/JSON feeds over HTTP with timeouts, a redirect limit
//! and a body size cap, then reduces each entry to its title and link.

use std::time::Duration;

use async_trait::async_trait;
use feed_rs::parser;
use reqwest::Client;

use crate::config::FeedsConfig;
use crate::error::{RelayError, Result};
use crate::feed::types::{FeedEntry, ParsedFeed};

/// User agent string for feed fetching.
const USER_AGENT: &str = "newsms/0.1 (headline relay)";

/// Retrieves and parses a feed by its source identifier.
#[async_trait]
pub trait FeedRetriever: Send + Sync {
    async fn retrieve(&self, source: &str) -> Result<ParsedFeed>;
}

/// HTTP feed fetcher.
pub struct FeedFetcher {
    client: Client,
    max_feed_size: u64,
}

impl FeedFetcher {
    /// Create a fetcher from the feed configuration.
    pub fn new(config: &FeedsConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RelayError::Feed(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_feed_size: config.max_feed_size_bytes,
        })
    }

    /// Fetch and parse the feed at `url`.
    pub async fn fetch(&self, url: &str) -> Result<ParsedFeed> {
        validate_url(url)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RelayError::Feed(format!("failed to fetch feed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RelayError::Feed(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_feed_size {
                return Err(RelayError::Feed(format!(
                    "feed too large: {} bytes (max {} bytes)",
                    content_length, self.max_feed_size
                )));
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RelayError::Feed(format!("failed to read response: {}", e)))?;

        if bytes.len() as u64 > self.max_feed_size {
            return Err(RelayError::Feed(format!(
                "feed too large: {} bytes (max {} bytes)",
                bytes.len(),
                self.max_feed_size
            )));
        }

        parse_feed(&bytes)
    }
}

#[async_trait]
impl FeedRetriever for FeedFetcher {
    async fn retrieve(&self, source: &str) -> Result<ParsedFeed> {
        self.fetch(source).await
    }
}

/// Check that a feed URL is absolute and uses http or https.
pub fn validate_url(url: &str) -> Result<()> {
    let parsed =
        url::Url::parse(url).map_err(|e| RelayError::Feed(format!("invalid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(RelayError::Feed(format!(
            "unsupported URL scheme: {}",
            scheme
        ))),
    }
}

/// Parse feed bytes into entries.
pub fn parse_feed(bytes: &[u8]) -> Result<ParsedFeed> {
    let feed = parser::parse(bytes)
        .map_err(|e| RelayError::Feed(format!("failed to parse feed: {}", e)))?;

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| FeedEntry {
            title: entry.title.map(|t| t.content),
            link: entry.links.into_iter().next().map(|l| l.href),
        })
        .collect();

    Ok(ParsedFeed::new(entries))
}
