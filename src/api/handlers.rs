//! HTTP request handlers

use super::sse::sse_stream;
use super::types::AgentQuery;
use super::AppState;
use crate::config::AppConfig;
use crate::runtime::{spawn_request, FrameEmitter};
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Conversation step, streamed as SSE
        .route("/api/agent", get(agent))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

/// Router plus the CORS and tracing layers configured for this deployment
pub fn build_app(
    state: AppState,
    config: &AppConfig,
) -> Result<Router, header::InvalidHeaderValue> {
    Ok(create_router(state)
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http()))
}

/// Pre-flight requests are answered here and never reach a handler.
fn cors_layer(config: &AppConfig) -> Result<CorsLayer, header::InvalidHeaderValue> {
    let origin = match config.restricted_origin() {
        Some(origin) => AllowOrigin::exact(HeaderValue::from_str(origin)?),
        None => AllowOrigin::any(),
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

// ============================================================
// Conversation Step
// ============================================================

async fn agent(
    State(state): State<AppState>,
    Query(query): Query<AgentQuery>,
) -> impl IntoResponse {
    let (event, conv_state) = query.decode();
    tracing::info!(event = %event.tag, "Conversation step");

    let (emitter, frames) = FrameEmitter::channel();
    spawn_request(state.runtime.clone(), event, conv_state, emitter);

    sse_stream(frames)
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("nudge ", env!("CARGO_PKG_VERSION"))
}
