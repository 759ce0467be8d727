//! Configuration module for newsms.

use serde::Deserialize;
use std::path::Path;

use crate::sms::{MessageStyle, SmsBudget};
use crate::{RelayError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Feed configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedsConfig {
    /// Feed URLs, polled in order.
    #[serde(default)]
    pub urls: Vec<String>,
    /// Maximum number of headlines per batch.
    #[serde(default = "default_max_headlines")]
    pub max_headlines: usize,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds.
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_total_timeout")]
    pub total_timeout_secs: u64,
    /// Maximum number of redirects.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Maximum feed size in bytes.
    #[serde(default = "default_max_feed_size")]
    pub max_feed_size_bytes: u64,
}

fn default_max_headlines() -> usize {
    5
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_read_timeout() -> u64 {
    20
}

fn default_total_timeout() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    5
}

fn default_max_feed_size() -> u64 {
    5 * 1024 * 1024 // 5MB
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            urls: vec![],
            max_headlines: default_max_headlines(),
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_read_timeout(),
            total_timeout_secs: default_total_timeout(),
            max_redirects: default_max_redirects(),
            max_feed_size_bytes: default_max_feed_size(),
        }
    }
}

/// SMS provider and message configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsConfig {
    /// Twilio account SID.
    #[serde(default)]
    pub account_sid: String,
    /// Twilio auth token.
    #[serde(default)]
    pub auth_token: String,
    /// Sender phone number.
    #[serde(default)]
    pub from_phone: String,
    /// Recipient of on-demand sends.
    #[serde(default)]
    pub user_phone: String,
    /// Base URL of the Twilio REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Number of SMS segments a message may occupy.
    #[serde(default = "default_segments")]
    pub segments: usize,
    /// Characters counted per segment.
    #[serde(default = "default_chars_per_segment")]
    pub chars_per_segment: usize,
    /// Message rendering style.
    #[serde(default)]
    pub style: MessageStyle,
    /// Line placed before a numbered list (numbered style only).
    #[serde(default)]
    pub numbered_prefix: String,
}

fn default_api_base_url() -> String {
    "https://api.twilio.com".to_string()
}

fn default_segments() -> usize {
    2
}

// 70 rather than 160 leaves room for UCS-2 encoding.
fn default_chars_per_segment() -> usize {
    70
}

impl SmsConfig {
    /// Budget derived from the segment settings.
    pub fn budget(&self) -> SmsBudget {
        SmsBudget::new(self.segments, self.chars_per_segment)
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_phone: String::new(),
            user_phone: String::new(),
            api_base_url: default_api_base_url(),
            segments: default_segments(),
            chars_per_segment: default_chars_per_segment(),
            style: MessageStyle::default(),
            numbered_prefix: String::new(),
        }
    }
}

/// Subscriber store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribersConfig {
    /// Path to the subscriber JSON file.
    #[serde(default = "default_subscribers_path")]
    pub path: String,
}

fn default_subscribers_path() -> String {
    "subscribers.json".to_string()
}

impl Default for SubscribersConfig {
    fn default() -> Self {
        Self {
            path: default_subscribers_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/newsms.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Feed configuration.
    #[serde(default)]
    pub feeds: FeedsConfig,
    /// SMS configuration.
    #[serde(default)]
    pub sms: SmsConfig,
    /// Subscriber store configuration.
    #[serde(default)]
    pub subscribers: SubscribersConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(RelayError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| RelayError::Config(format!("config parse error: {e}")))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key/value lookup.
    ///
    /// Supported keys:
    /// - `FEEDS`: comma-separated feed URLs
    /// - `MAX_HEADLINES`: maximum headlines per batch
    /// - `TWILIO_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_PHONE`, `USER_PHONE`
    /// - `NEWSMS_PORT`, `NEWSMS_SUBSCRIBERS`
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("FEEDS") {
            self.feeds.urls = parse_feed_list(&raw);
        }

        if let Some(raw) = lookup("MAX_HEADLINES") {
            match raw.trim().parse::<usize>() {
                Ok(max) => self.feeds.max_headlines = max,
                Err(_) => tracing::warn!("Ignoring invalid MAX_HEADLINES value: {:?}", raw),
            }
        }

        let string_overrides: [(&str, &mut String); 5] = [
            ("TWILIO_SID", &mut self.sms.account_sid),
            ("TWILIO_AUTH_TOKEN", &mut self.sms.auth_token),
            ("TWILIO_PHONE", &mut self.sms.from_phone),
            ("USER_PHONE", &mut self.sms.user_phone),
            ("NEWSMS_SUBSCRIBERS", &mut self.subscribers.path),
        ];
        for (key, slot) in string_overrides {
            if let Some(value) = lookup(key) {
                if !value.is_empty() {
                    *slot = value;
                }
            }
        }

        if let Some(raw) = lookup("NEWSMS_PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid NEWSMS_PORT value: {:?}", raw),
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.feeds.max_headlines == 0 {
            return Err(RelayError::Validation(
                "max_headlines must be at least 1".to_string(),
            ));
        }
        if self.sms.segments == 0 || self.sms.chars_per_segment == 0 {
            return Err(RelayError::Validation(
                "segments and chars_per_segment must be positive".to_string(),
            ));
        }
        if self.sms.budget().max_chars() < 4 {
            return Err(RelayError::Validation(format!(
                "SMS budget of {} characters is too small",
                self.sms.budget().max_chars()
            )));
        }
        Ok(())
    }
}

/// Split a comma-separated feed list, trimming entries and dropping empties.
pub fn parse_feed_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect()
}
