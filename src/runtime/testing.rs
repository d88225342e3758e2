//! Mock implementations for testing
//!
//! These mocks let the runtime run without a real recommendation service.

use crate::recommend::{
    Recommendation, RecommendError, RecommendationClient, RecommendationRequest,
};
use crate::state_machine::Frame;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, Notify};

// ============================================================================
// Mock Recommendation Client
// ============================================================================

/// Mock client that returns queued outcomes
pub struct MockRecommendationClient {
    responses: Mutex<VecDeque<Result<Recommendation, RecommendError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<RecommendationRequest>>,
}

#[allow(dead_code)]
impl MockRecommendationClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_recommendation(&self, recommendation: Recommendation) {
        self.responses.lock().unwrap().push_back(Ok(recommendation));
    }

    /// Queue a failure
    pub fn queue_error(&self, error: RecommendError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<RecommendationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockRecommendationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecommendationClient for MockRecommendationClient {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, RecommendError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RecommendError::network("No mock response queued")))
    }
}

// ============================================================================
// Delayed Mock Client (for disconnect testing)
// ============================================================================

/// Mock client that sleeps before answering
pub struct DelayedMockClient {
    inner: MockRecommendationClient,
    delay: Duration,
    /// Notified when a request starts (for test synchronization)
    pub request_started: Arc<Notify>,
}

impl DelayedMockClient {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MockRecommendationClient::new(),
            delay,
            request_started: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl RecommendationClient for DelayedMockClient {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, RecommendError> {
        self.request_started.notify_one();
        tokio::time::sleep(self.delay).await;
        self.inner.recommend(request).await
    }
}

// ============================================================================
// Panicking Client (for fault containment testing)
// ============================================================================

/// Client whose every call panics
pub struct PanickingClient;

#[async_trait]
impl RecommendationClient for PanickingClient {
    async fn recommend(
        &self,
        _request: &RecommendationRequest,
    ) -> Result<Recommendation, RecommendError> {
        panic!("recommendation client exploded")
    }
}

/// Drain a frame channel until every sender is gone
pub async fn collect_frames(mut rx: mpsc::Receiver<Frame>) -> Vec<Frame> {
    let mut frames = Vec::new();
    while let Some(frame) = rx.recv().await {
        frames.push(frame);
    }
    frames
}
