//! Shared collaborators for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use newsms::feed::{FeedEntry, FeedRetriever, HeadlineAggregator, ParsedFeed};
use newsms::sms::{MessageStyle, SmsBudget, SmsFormatter, SmsSender};
use newsms::subscriber::MemoryStore;
use newsms::{NewsRelay, RelayError, Result};

/// Retriever serving canned feeds; unknown sources fail.
#[derive(Default)]
pub struct StubRetriever {
    feeds: HashMap<String, Vec<FeedEntry>>,
}

impl StubRetriever {
    pub fn with_feed(mut self, source: &str, entries: &[(&str, &str)]) -> Self {
        self.feeds.insert(
            source.to_string(),
            entries.iter().map(|(t, l)| FeedEntry::new(*t, *l)).collect(),
        );
        self
    }
}

#[async_trait]
impl FeedRetriever for StubRetriever {
    async fn retrieve(&self, source: &str) -> Result<ParsedFeed> {
        self.feeds
            .get(source)
            .cloned()
            .map(ParsedFeed::new)
            .ok_or_else(|| RelayError::Feed(format!("unreachable: {}", source)))
    }
}

/// Sender that records messages, or fails with the given error.
#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<String>>,
    pub failure: Option<fn() -> RelayError>,
}

impl RecordingSender {
    pub fn failing(failure: fn() -> RelayError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(failure),
        }
    }
}

#[async_trait]
impl SmsSender for RecordingSender {
    async fn send(&self, body: &str, _from: &str, _to: &str) -> Result<String> {
        if let Some(failure) = self.failure {
            return Err(failure());
        }
        self.sent.lock().unwrap().push(body.to_string());
        Ok("SM0123456789".to_string())
    }
}

/// Build a relay over the given collaborators with the default SMS budget.
pub fn create_relay(
    retriever: StubRetriever,
    sources: &[&str],
    sender: Arc<RecordingSender>,
    store: Arc<MemoryStore>,
) -> NewsRelay {
    let aggregator = HeadlineAggregator::new(
        Arc::new(retriever),
        sources.iter().map(|s| s.to_string()).collect(),
        5,
    );
    NewsRelay::new(
        aggregator,
        SmsFormatter::new(SmsBudget::default(), MessageStyle::Bulleted),
        sender,
        store,
    )
    .with_phones("+15550000000", "+15551111111")
}
