//! newsms - RSS headlines over SMS
//!
//! Collects headlines from a list of feeds, condenses them into a short
//! text message, sends it through Twilio and answers START/STOP/NEWS
//! commands arriving on an SMS webhook.

pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod relay;
pub mod sms;
pub mod subscriber;
pub mod web;

pub use config::Config;
pub use error::{RelayError, Result};
pub use feed::{Headline, HeadlineAggregator};
pub use relay::{NewsRelay, SendReport};
pub use sms::{SmsFormatter, SmsSender};
pub use subscriber::{Subscriber, SubscriberStore};
pub use web::WebServer;
