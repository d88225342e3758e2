//! Recommendation error types

use thiserror::Error;

/// Recommendation failure with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RecommendError {
    pub kind: RecommendErrorKind,
    pub message: String,
}

impl RecommendError {
    pub fn new(kind: RecommendErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(RecommendErrorKind::Network, message)
    }

    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self::new(RecommendErrorKind::Status(code), message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(RecommendErrorKind::Decode, message)
    }

    pub fn not_configured() -> Self {
        Self::new(
            RecommendErrorKind::NotConfigured,
            "NEXT_MOVE_URL is not set",
        )
    }
}

/// Error classification, for logs only; every kind is rendered the same way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendErrorKind {
    /// Connection failures, timeouts
    Network,
    /// Non-2xx response
    Status(u16),
    /// Body was not a recommendation object
    Decode,
    /// No service endpoint configured
    NotConfigured,
}
