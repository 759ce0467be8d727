//! Router configuration.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{health, home, news, send, sms_webhook, AppState};

/// Create the application router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/news", get(news))
        .route("/send", post(send));

    Router::new()
        .route("/", get(home))
        .route("/sms", post(sms_webhook))
        .nest("/api", api_routes)
        .merge(create_health_router())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
