//! HTTP API
//!
//! One streaming endpoint drives the conversation; everything else is plumbing.

mod handlers;
mod sse;
mod types;

pub use handlers::build_app;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::config::AppConfig;
use crate::recommend::{HttpRecommendationClient, LoggingClient, RecommendationClient};
use crate::runtime::{ConversationRuntime, ProductionRuntime};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ProductionRuntime>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client =
            HttpRecommendationClient::new(config.next_move_url.clone(), config.recommend_timeout)?;
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn RecommendationClient>) -> Self {
        Self {
            runtime: Arc::new(ConversationRuntime::new(LoggingClient::new(client))),
        }
    }
}
