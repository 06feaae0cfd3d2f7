//! Route configuration for questionnaire endpoints.
//!
//! Configures the Axum router and the middleware stack around it.

use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::handlers::{
    chatbot, download, generate_doc, health, progress, reset, QuestionnaireAppState,
    SESSION_HEADER,
};

/// Creates the questionnaire router with all endpoints.
///
/// Routes:
/// - `POST /chatbot` - Submit an answer (form field `user_input`)
/// - `POST /reset` - Reset the conversation
/// - `POST /generate-doc` - Fill the template from stored answers
/// - `GET /download` - Download the filled document
/// - `GET /progress` - Current question and position
/// - `GET /health` - Liveness
pub fn questionnaire_router() -> Router<QuestionnaireAppState> {
    Router::new()
        .route("/chatbot", post(chatbot))
        .route("/reset", post(reset))
        .route("/generate-doc", post(generate_doc))
        .route("/download", get(download))
        .route("/progress", get(progress))
        .route("/health", get(health))
}

/// Full application router: routes, tracing, timeout and CORS.
///
/// An empty `cors_origins` list allows any origin.
pub fn app_router(
    state: QuestionnaireAppState,
    cors_origins: &[String],
    request_timeout: Duration,
) -> Router {
    questionnaire_router()
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    let session_header = HeaderName::from_static(SESSION_HEADER);
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, session_header.clone()])
        .expose_headers([session_header, header::CONTENT_DISPOSITION])
}
