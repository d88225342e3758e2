//! Nudge - scripted conversational widget backend
//!
//! Streams display frames for a three-question "next move" conversation.
//! The server keeps no session: the client echoes its state on every call.

mod api;
mod config;
mod recommend;
mod runtime;
mod sanitize;
mod state_machine;

use api::{build_app, AppState};
use config::AppConfig;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nudge=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();

    if config.next_move_url.is_none() {
        tracing::warn!("NEXT_MOVE_URL is not set; recommendations will fail gracefully");
    }
    tracing::info!(
        allowed_origin = config.allowed_origin.as_deref().unwrap_or("*"),
        recommend_timeout_secs = config.recommend_timeout.as_secs(),
        "Configuration loaded"
    );

    // Create application state and router
    let state = AppState::new(&config)?;
    let app = build_app(state, &config)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Nudge server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
