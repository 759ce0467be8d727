//! HTTP handlers.

use axum::{
    extract::{rejection::FormRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Form, Json,
};
use std::sync::Arc;

use crate::relay::NewsRelay;
use crate::sms::MessagingResponse;
use crate::web::dto::{InboundSms, NewsResponse, SendResponse};
use crate::web::error::ApiError;

/// Shared state for all handlers.
pub struct AppState {
    pub relay: NewsRelay,
}

impl AppState {
    pub fn new(relay: NewsRelay) -> Self {
        Self { relay }
    }
}

/// GET / - Liveness banner.
pub async fn home() -> &'static str {
    "Offline News SMS Bot is running!"
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

/// GET /api/news - Current headlines as JSON.
pub async fn news(State(state): State<Arc<AppState>>) -> Json<NewsResponse> {
    let headlines = state.relay.headlines().await;
    Json(NewsResponse { headlines })
}

/// POST /api/send - Send the current headlines to the configured phone.
pub async fn send(State(state): State<Arc<AppState>>) -> Result<Json<SendResponse>, ApiError> {
    let report = state.relay.send_now().await?;
    Ok(Json(report.into()))
}

/// POST /sms - Inbound SMS webhook, answered with TwiML.
///
/// A body that is not form-encoded is treated as an empty message and
/// gets the help reply.
pub async fn sms_webhook(
    State(state): State<Arc<AppState>>,
    form: std::result::Result<Form<InboundSms>, FormRejection>,
) -> Response {
    let inbound = match form {
        Ok(Form(inbound)) => inbound,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable inbound SMS body");
            InboundSms::default()
        }
    };
    let reply = state
        .relay
        .handle_inbound(&inbound.from, &inbound.body)
        .await;
    let twiml = MessagingResponse::new().message(reply);

    ([(header::CONTENT_TYPE, "application/xml")], twiml.to_xml()).into_response()
}
