//! Client for the external recommendation ("next move") service
//!
//! The service is an opaque collaborator: one request in, one suggestion out.
//! Failures are classified but never retried here.

mod error;
mod http;
mod types;

pub use error::{RecommendError, RecommendErrorKind};
pub use http::HttpRecommendationClient;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for recommendation backends
#[async_trait]
pub trait RecommendationClient: Send + Sync {
    /// Ask for a next move. A non-success status or unparsable body is an error,
    /// never a partial result.
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, RecommendError>;
}

#[async_trait]
impl<T: RecommendationClient + ?Sized> RecommendationClient for Arc<T> {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, RecommendError> {
        (**self).recommend(request).await
    }
}

/// Logging wrapper for recommendation clients
pub struct LoggingClient {
    inner: Arc<dyn RecommendationClient>,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn RecommendationClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RecommendationClient for LoggingClient {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, RecommendError> {
        let start = std::time::Instant::now();
        let result = self.inner.recommend(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(rec) => {
                tracing::info!(
                    area = %request.area,
                    energy = %request.energy,
                    time_minutes = request.time_minutes,
                    tweak = request.tweak.as_deref(),
                    duration_ms = %duration.as_millis(),
                    has_next_move = rec.next_move().is_some(),
                    checkin_window_hours = rec.checkin_window_hours,
                    "Recommendation received"
                );
            }
            Err(e) => {
                tracing::error!(
                    area = %request.area,
                    energy = %request.energy,
                    time_minutes = request.time_minutes,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Recommendation request failed"
                );
            }
        }

        result
    }
}
