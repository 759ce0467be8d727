//! Feed and headline types.

use serde::Serialize;

/// A single entry of a parsed feed, before extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    /// Entry title, if the feed provided one.
    pub title: Option<String>,
    /// Entry link, if the feed provided one.
    pub link: Option<String>,
}

impl FeedEntry {
    /// Create an entry with both fields present.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            link: Some(link.into()),
        }
    }

    /// Extract a headline, trimming both fields.
    ///
    /// Returns `None` when the trimmed title is empty.
    pub fn to_headline(&self) -> Option<Headline> {
        let title = self.title.as_deref().unwrap_or("").trim();
        if title.is_empty() {
            return None;
        }
        let link = self.link.as_deref().unwrap_or("").trim();
        Some(Headline::new(title, link))
    }
}

/// A parsed feed: its entries in the order the feed lists them.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub entries: Vec<FeedEntry>,
}

impl ParsedFeed {
    pub fn new(entries: Vec<FeedEntry>) -> Self {
        Self { entries }
    }
}

/// An extracted headline. The title is the deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    /// Non-empty, trimmed title.
    pub title: String,
    /// Trimmed link, possibly empty.
    pub link: String,
}

impl Headline {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}
