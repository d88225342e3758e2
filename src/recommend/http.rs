//! HTTP implementation of the recommendation client

use super::{Recommendation, RecommendError, RecommendationClient, RecommendationRequest};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Longest slice of an error body kept in the error message
const MAX_ERROR_BODY: usize = 512;

/// JSON-over-HTTP recommendation service
pub struct HttpRecommendationClient {
    client: Client,
    url: Option<String>,
}

impl HttpRecommendationClient {
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> RecommendError {
        let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
        RecommendError::status(
            status.as_u16(),
            format!("Recommendation service returned {status}: {snippet}"),
        )
    }
}

#[async_trait]
impl RecommendationClient for HttpRecommendationClient {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, RecommendError> {
        let url = self.url.as_deref().ok_or_else(RecommendError::not_configured)?;

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| RecommendError::network(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RecommendError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| RecommendError::decode(format!("Failed to parse response: {e}")))
    }
}
