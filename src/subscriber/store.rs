//! Subscriber persistence.
//!
//! The whole list is loaded and saved at once. Loading never fails: a
//! missing file or one that is not a JSON array reads as an empty list,
//! and the next save replaces it. Records inside a valid array are read
//! leniently so one malformed entry never drops the rest.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{RelayError, Result};
use crate::subscriber::types::Subscriber;

/// Load-all / save-all storage for the subscriber list.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Load every record. Missing or corrupt storage reads as empty.
    async fn load_all(&self) -> Vec<Subscriber>;

    /// Replace the stored list.
    async fn save_all(&self, subscribers: &[Subscriber]) -> Result<()>;
}

/// Subscriber list kept in a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SubscriberStore for JsonFileStore {
    async fn load_all(&self) -> Vec<Subscriber> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read subscriber file");
                return Vec::new();
            }
        };

        let records: Vec<Value> = match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Subscriber file is corrupt, treating as empty");
                return Vec::new();
            }
        };

        records
            .iter()
            .filter_map(|record| {
                let subscriber = Subscriber::from_record(record);
                if subscriber.is_none() {
                    tracing::warn!(path = %self.path.display(), record = %record, "Skipping subscriber record that is not an object");
                }
                subscriber
            })
            .collect()
    }

    async fn save_all(&self, subscribers: &[Subscriber]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    RelayError::Store(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(subscribers)?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            RelayError::Store(format!("failed to write {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

/// In-memory subscriber list.
#[derive(Debug, Default)]
pub struct MemoryStore {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscribers(subscribers: Vec<Subscriber>) -> Self {
        Self {
            subscribers: Mutex::new(subscribers),
        }
    }
}

#[async_trait]
impl SubscriberStore for MemoryStore {
    async fn load_all(&self) -> Vec<Subscriber> {
        self.subscribers.lock().await.clone()
    }

    async fn save_all(&self, subscribers: &[Subscriber]) -> Result<()> {
        *self.subscribers.lock().await = subscribers.to_vec();
        Ok(())
    }
}
