//! News relay service.
//!
//! Connects the headline aggregator, the SMS formatter, the SMS sender and
//! the subscriber store. The fallback texts for empty batches live here,
//! not in the formatter.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{RelayError, Result};
use crate::feed::{FeedFetcher, Headline, HeadlineAggregator};
use crate::sms::{SmsFormatter, SmsSender, TwilioClient};
use crate::subscriber::{
    active_phones, subscribe, unsubscribe, Command, JsonFileStore, Subscriber, SubscriberStore,
};

/// Headline sent by the send-now action when no feed produced anything.
pub const SEND_FALLBACK_HEADLINE: &str = "No news available";

/// Reply to NEWS when no feed produced anything.
pub const NEWS_FALLBACK_REPLY: &str = "No headlines found right now. Try again later.";

pub const SUBSCRIBED_REPLY: &str =
    "Subscribed! You'll get daily headlines. Reply STOP to unsubscribe. Send NEWS anytime for instant headlines.";

pub const UNSUBSCRIBED_REPLY: &str = "Unsubscribed. Reply START to re-subscribe.";

pub const HELP_REPLY: &str =
    "Hi! Reply START to subscribe, STOP to unsubscribe, or NEWS for latest headlines.";

/// Result of a send-now action.
#[derive(Debug, Clone, Serialize)]
pub struct SendReport {
    /// Provider message SID.
    pub sid: String,
    /// Headlines that went into the message.
    pub headlines: Vec<Headline>,
}

/// The relay service shared by all request handlers.
pub struct NewsRelay {
    aggregator: HeadlineAggregator,
    formatter: SmsFormatter,
    sender: Arc<dyn SmsSender>,
    store: Arc<dyn SubscriberStore>,
    from_phone: String,
    user_phone: String,
    // Serializes load-modify-save of the subscriber list within this process.
    store_lock: Mutex<()>,
}

impl NewsRelay {
    pub fn new(
        aggregator: HeadlineAggregator,
        formatter: SmsFormatter,
        sender: Arc<dyn SmsSender>,
        store: Arc<dyn SubscriberStore>,
    ) -> Self {
        Self {
            aggregator,
            formatter,
            sender,
            store,
            from_phone: String::new(),
            user_phone: String::new(),
            store_lock: Mutex::new(()),
        }
    }

    /// Set the sender number and the recipient of send-now messages.
    pub fn with_phones(
        mut self,
        from_phone: impl Into<String>,
        user_phone: impl Into<String>,
    ) -> Self {
        self.from_phone = from_phone.into();
        self.user_phone = user_phone.into();
        self
    }

    /// Build the production relay: HTTP feeds, Twilio, JSON file store.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = FeedFetcher::new(&config.feeds)?;
        let aggregator = HeadlineAggregator::new(
            Arc::new(fetcher),
            config.feeds.urls.clone(),
            config.feeds.max_headlines,
        )
        .with_failure_hook(Arc::new(|source: &str, err: &RelayError| {
            warn!(source = %source, error = %err, "Feed source skipped");
        }));

        let sender = TwilioClient::new(&config.sms)?;
        let store = JsonFileStore::new(&config.subscribers.path);

        Ok(Self::new(
            aggregator,
            SmsFormatter::from_config(&config.sms),
            Arc::new(sender),
            Arc::new(store),
        )
        .with_phones(&config.sms.from_phone, &config.sms.user_phone))
    }

    /// Current headline batch.
    pub async fn headlines(&self) -> Vec<Headline> {
        self.aggregator.collect().await
    }

    /// Send the current headlines to the configured user phone.
    pub async fn send_now(&self) -> Result<SendReport> {
        let mut headlines = self.headlines().await;
        if headlines.is_empty() {
            headlines.push(Headline::new(SEND_FALLBACK_HEADLINE, ""));
        }

        let body = self.formatter.format(&headlines);
        let sid = self
            .sender
            .send(&body, &self.from_phone, &self.user_phone)
            .await?;

        info!(sid = %sid, count = headlines.len(), "Headlines sent");
        Ok(SendReport { sid, headlines })
    }

    /// Handle an inbound SMS and return the reply text.
    pub async fn handle_inbound(&self, from: &str, body: &str) -> String {
        let command = Command::parse(body);
        info!(from = %from, command = ?command, "Inbound SMS");

        match command {
            Command::Subscribe => {
                self.update_subscribers(|subs| subscribe(subs, from)).await;
                SUBSCRIBED_REPLY.to_string()
            }
            Command::Unsubscribe => {
                self.update_subscribers(|subs| unsubscribe(subs, from)).await;
                UNSUBSCRIBED_REPLY.to_string()
            }
            Command::RequestNews => {
                let headlines = self.headlines().await;
                if headlines.is_empty() {
                    NEWS_FALLBACK_REPLY.to_string()
                } else {
                    self.formatter.format(&headlines)
                }
            }
            Command::Unknown => HELP_REPLY.to_string(),
        }
    }

    /// Load the list, apply `change`, save it back.
    ///
    /// A failed save is logged; the caller still replies.
    async fn update_subscribers<F>(&self, change: F)
    where
        F: FnOnce(&mut Vec<Subscriber>) + Send,
    {
        let _guard = self.store_lock.lock().await;

        let mut subscribers = self.store.load_all().await;
        change(&mut subscribers);

        match self.store.save_all(&subscribers).await {
            Ok(()) => info!(
                active = active_phones(&subscribers).len(),
                total = subscribers.len(),
                "Subscriber list saved"
            ),
            Err(e) => error!(error = %e, "Failed to save subscriber list"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedEntry, FeedRetriever, ParsedFeed};
    use crate::sms::{MessageStyle, SmsBudget};
    use crate::subscriber::MemoryStore;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    struct StubRetriever {
        feeds: HashMap<String, Vec<FeedEntry>>,
    }

    #[async_trait]
    impl FeedRetriever for StubRetriever {
        async fn retrieve(&self, source: &str) -> Result<ParsedFeed> {
            self.feeds
                .get(source)
                .cloned()
                .map(ParsedFeed::new)
                .ok_or_else(|| RelayError::Feed("unreachable".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingSender {
        sent: StdMutex<Vec<(String, String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl SmsSender for RecordingSender {
        async fn send(&self, body: &str, from: &str, to: &str) -> Result<String> {
            if self.fail {
                return Err(RelayError::Sms("provider down".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((body.to_string(), from.to_string(), to.to_string()));
            Ok("SM0001".to_string())
        }
    }

    fn relay_with(
        entries: &[(&str, &str)],
        sender: Arc<RecordingSender>,
        store: Arc<MemoryStore>,
    ) -> NewsRelay {
        let mut feeds = HashMap::new();
        feeds.insert(
            "feedA".to_string(),
            entries
                .iter()
                .map(|(t, l)| FeedEntry::new(*t, *l))
                .collect(),
        );
        let aggregator = HeadlineAggregator::new(
            Arc::new(StubRetriever { feeds }),
            vec!["down".to_string(), "feedA".to_string()],
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

    #[tokio::test]
    async fn test_send_now_formats_and_sends() {
        let sender = Arc::new(RecordingSender::default());
        let relay = relay_with(
            &[("Story One", "l1"), ("Story Two", "l2")],
            sender.clone(),
            Arc::new(MemoryStore::new()),
        );

        let report = relay.send_now().await.unwrap();

        assert_eq!(report.sid, "SM0001");
        assert_eq!(report.headlines.len(), 2);
        let sent = sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Top News:\n- Story One\n- Story Two");
        assert_eq!(sent[0].1, "+15550000000");
        assert_eq!(sent[0].2, "+15551111111");
    }

    #[tokio::test]
    async fn test_send_now_uses_placeholder_when_empty() {
        let sender = Arc::new(RecordingSender::default());
        let relay = relay_with(&[], sender.clone(), Arc::new(MemoryStore::new()));

        let report = relay.send_now().await.unwrap();

        assert_eq!(report.headlines, vec![Headline::new(SEND_FALLBACK_HEADLINE, "")]);
        assert_eq!(
            sender.sent.lock().unwrap()[0].0,
            "Top News:\n- No news available"
        );
    }

    #[tokio::test]
    async fn test_send_now_propagates_provider_failure() {
        let sender = Arc::new(RecordingSender {
            fail: true,
            ..Default::default()
        });
        let relay = relay_with(&[("Story", "l")], sender, Arc::new(MemoryStore::new()));

        let result = relay.send_now().await;

        assert!(matches!(result, Err(RelayError::Sms(_))));
    }

    #[tokio::test]
    async fn test_lowercase_start_subscribes() {
        let store = Arc::new(MemoryStore::new());
        let relay = relay_with(&[], Arc::new(RecordingSender::default()), store.clone());

        let reply = relay.handle_inbound("+15552222222", "start").await;

        assert_eq!(reply, SUBSCRIBED_REPLY);
        assert_eq!(
            store.load_all().await,
            vec![Subscriber::new("+15552222222")]
        );
    }

    #[tokio::test]
    async fn test_stopped_unsubscribes() {
        let store = Arc::new(MemoryStore::with_subscribers(vec![Subscriber::new(
            "+15552222222",
        )]));
        let relay = relay_with(&[], Arc::new(RecordingSender::default()), store.clone());

        let reply = relay.handle_inbound("+15552222222", "STOPPED").await;

        assert_eq!(reply, UNSUBSCRIBED_REPLY);
        assert_eq!(
            store.load_all().await,
            vec![Subscriber::inactive("+15552222222")]
        );
    }

    #[tokio::test]
    async fn test_stop_from_unknown_number_adds_nothing() {
        let store = Arc::new(MemoryStore::new());
        let relay = relay_with(&[], Arc::new(RecordingSender::default()), store.clone());

        let reply = relay.handle_inbound("+15553333333", "STOP").await;

        assert_eq!(reply, UNSUBSCRIBED_REPLY);
        assert!(store.load_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_start_keeps_existing_records_with_null_fields() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("subscribers.json");
        std::fs::write(
            &path,
            r#"[{"phone":"+1111","active":true},{"phone":null,"active":false}]"#,
        )
        .unwrap();
        let store = Arc::new(JsonFileStore::new(&path));
        let aggregator = HeadlineAggregator::new(
            Arc::new(StubRetriever {
                feeds: HashMap::new(),
            }),
            vec![],
            5,
        );
        let relay = NewsRelay::new(
            aggregator,
            SmsFormatter::default(),
            Arc::new(RecordingSender::default()),
            store.clone(),
        );

        let reply = relay.handle_inbound("+2222", "START").await;

        assert_eq!(reply, SUBSCRIBED_REPLY);
        assert_eq!(
            store.load_all().await,
            vec![
                Subscriber::new("+1111"),
                Subscriber::inactive(""),
                Subscriber::new("+2222"),
            ]
        );
    }

    #[tokio::test]
    async fn test_news_replies_with_headlines() {
        let relay = relay_with(
            &[("Story One", "l1")],
            Arc::new(RecordingSender::default()),
            Arc::new(MemoryStore::new()),
        );

        let reply = relay.handle_inbound("+1555", "news").await;

        assert_eq!(reply, "Top News:\n- Story One");
    }

    #[tokio::test]
    async fn test_news_fallback_when_empty() {
        let relay = relay_with(
            &[],
            Arc::new(RecordingSender::default()),
            Arc::new(MemoryStore::new()),
        );

        let reply = relay.handle_inbound("+1555", "NEWS").await;

        assert_eq!(reply, NEWS_FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_unknown_command_gets_help() {
        let relay = relay_with(
            &[],
            Arc::new(RecordingSender::default()),
            Arc::new(MemoryStore::new()),
        );

        assert_eq!(relay.handle_inbound("+1555", "hello").await, HELP_REPLY);
        assert_eq!(relay.handle_inbound("+1555", "").await, HELP_REPLY);
    }

    #[tokio::test]
    async fn test_concurrent_subscribes_are_not_lost() {
        let store = Arc::new(MemoryStore::new());
        let relay = Arc::new(relay_with(
            &[],
            Arc::new(RecordingSender::default()),
            store.clone(),
        ));

        let mut tasks = Vec::new();
        for i in 0..20 {
            let relay = relay.clone();
            tasks.push(tokio::spawn(async move {
                relay.handle_inbound(&format!("+1555000{:04}", i), "START").await
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(store.load_all().await.len(), 20);
    }
}
