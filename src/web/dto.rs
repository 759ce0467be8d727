//! Request and response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};

use crate::feed::Headline;
use crate::relay::SendReport;

/// Form fields of an inbound SMS webhook call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundSms {
    /// Message text.
    #[serde(rename = "Body", default)]
    pub body: String,
    /// Sender phone number.
    #[serde(rename = "From", default)]
    pub from: String,
}

/// GET /api/news response.
#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub headlines: Vec<Headline>,
}

/// POST /api/send response.
#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub status: &'static str,
    pub sid: String,
    pub headlines: Vec<Headline>,
}

impl From<SendReport> for SendResponse {
    fn from(report: SendReport) -> Self {
        Self {
            status: "sent",
            sid: report.sid,
            headlines: report.headlines,
        }
    }
}
