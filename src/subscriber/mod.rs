//! Subscribers and inbound SMS commands.

pub mod command;
pub mod list;
pub mod store;
pub mod types;

pub use command::Command;
pub use list::{active_phones, is_subscribed, subscribe, unsubscribe};
pub use store::{JsonFileStore, MemoryStore, SubscriberStore};
pub use types::Subscriber;
