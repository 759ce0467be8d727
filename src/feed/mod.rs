//! Feed retrieval and headline aggregation.

pub mod aggregator;
pub mod fetcher;
pub mod types;

pub use aggregator::{aggregate, HeadlineAggregator, SourceFailureHook};
pub use fetcher::{parse_feed, validate_url, FeedFetcher, FeedRetriever};
pub use types::{FeedEntry, Headline, ParsedFeed};
