//! Headline aggregation across feed sources.
//!
//! Sources are scanned in order and entries in feed order. Titles are
//! deduplicated by exact match after trimming; the first occurrence wins.
//! A source that fails to fetch or parse is skipped without affecting the
//! result beyond contributing nothing.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::RelayError;
use crate::feed::fetcher::FeedRetriever;
use crate::feed::types::Headline;

/// Callback invoked with the source URL and error when a source is skipped.
pub type SourceFailureHook = Arc<dyn Fn(&str, &RelayError) + Send + Sync>;

/// Collect up to `max_items` unique headlines from `sources`.
pub async fn aggregate<R>(retriever: &R, sources: &[String], max_items: usize) -> Vec<Headline>
where
    R: FeedRetriever + ?Sized,
{
    aggregate_with_hook(retriever, sources, max_items, None).await
}

async fn aggregate_with_hook<R>(
    retriever: &R,
    sources: &[String],
    max_items: usize,
    on_failure: Option<&SourceFailureHook>,
) -> Vec<Headline>
where
    R: FeedRetriever + ?Sized,
{
    let mut headlines = Vec::new();
    if max_items == 0 {
        return headlines;
    }

    let mut seen: HashSet<String> = HashSet::new();

    for source in sources {
        let feed = match retriever.retrieve(source).await {
            Ok(feed) => feed,
            Err(e) => {
                debug!(source = %source, error = %e, "Skipping feed source");
                if let Some(hook) = on_failure {
                    hook(source, &e);
                }
                continue;
            }
        };

        for entry in &feed.entries {
            let Some(headline) = entry.to_headline() else {
                continue;
            };
            if !seen.insert(headline.title.clone()) {
                continue;
            }
            headlines.push(headline);
            if headlines.len() >= max_items {
                break;
            }
        }

        if headlines.len() >= max_items {
            break;
        }
    }

    headlines
}

/// Aggregator bound to a retriever, a source list and a batch size.
pub struct HeadlineAggregator {
    retriever: Arc<dyn FeedRetriever>,
    sources: Vec<String>,
    max_items: usize,
    on_failure: Option<SourceFailureHook>,
}

impl HeadlineAggregator {
    pub fn new(retriever: Arc<dyn FeedRetriever>, sources: Vec<String>, max_items: usize) -> Self {
        Self {
            retriever,
            sources,
            max_items,
            on_failure: None,
        }
    }

    /// Observe skipped sources without changing the result.
    pub fn with_failure_hook(mut self, hook: SourceFailureHook) -> Self {
        self.on_failure = Some(hook);
        self
    }

    /// Fetch the current batch of headlines.
    pub async fn collect(&self) -> Vec<Headline> {
        aggregate_with_hook(
            self.retriever.as_ref(),
            &self.sources,
            self.max_items,
            self.on_failure.as_ref(),
        )
        .await
    }
}
