//! Outbound SMS over the Twilio REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::SmsConfig;
use crate::error::{RelayError, Result};

/// Request timeout for provider calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Sends a text message and returns the provider's message identifier.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, body: &str, from: &str, to: &str) -> Result<String>;
}

/// Message resource returned on a successful create.
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

/// Error body returned on a failed request.
#[derive(Debug, Deserialize)]
struct ErrorResource {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// Twilio Messages API client.
pub struct TwilioClient {
    client: Client,
    account_sid: String,
    auth_token: String,
    api_base_url: String,
}

impl TwilioClient {
    /// Create a client from the SMS configuration.
    ///
    /// Credentials are checked when sending, so a relay without SMS
    /// credentials can still serve headlines.
    pub fn new(config: &SmsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| RelayError::Sms(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            api_base_url: config.api_base_url.clone(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base_url.trim_end_matches('/'),
            self.account_sid
        )
    }

    fn check_ready(&self, from: &str, to: &str) -> Result<()> {
        if self.account_sid.is_empty() {
            return Err(RelayError::Config("TWILIO_SID is not set".to_string()));
        }
        if self.auth_token.is_empty() {
            return Err(RelayError::Config(
                "TWILIO_AUTH_TOKEN is not set".to_string(),
            ));
        }
        if from.is_empty() {
            return Err(RelayError::Config("sender phone is not set".to_string()));
        }
        if to.is_empty() {
            return Err(RelayError::Config("recipient phone is not set".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SmsSender for TwilioClient {
    async fn send(&self, body: &str, from: &str, to: &str) -> Result<String> {
        self.check_ready(from, to)?;

        let params = [("Body", body), ("From", from), ("To", to)];
        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| RelayError::Sms(format!("request failed: {}", e)))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RelayError::Sms(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            let detail = match serde_json::from_slice::<ErrorResource>(&bytes) {
                Ok(ErrorResource {
                    code: Some(code),
                    message: Some(message),
                }) => format!("{} (code {})", message, code),
                Ok(ErrorResource {
                    message: Some(message),
                    ..
                }) => message,
                _ => String::from_utf8_lossy(&bytes).trim().to_string(),
            };
            return Err(RelayError::Sms(format!("provider returned {}: {}", status, detail)));
        }

        let message: MessageResource = serde_json::from_slice(&bytes)
            .map_err(|e| RelayError::Sms(format!("unexpected provider response: {}", e)))?;

        tracing::info!(sid = %message.sid, to = %to, "SMS sent");
        Ok(message.sid)
    }
}
