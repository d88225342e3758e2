//! Effects produced by state transitions

use super::Frame;
use crate::recommend::RecommendationRequest;

/// Steps the runtime performs, in order, after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Push a frame to the client
    Emit(Frame),

    /// Call the recommendation service and render its outcome
    Recommend {
        request: RecommendationRequest,
        flow: RecommendFlow,
    },
}

/// Which step asked for a recommendation; decides headline and fallbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendFlow {
    /// First suggestion after all three answers
    FirstMove,
    /// "Give me another option"
    Variation,
}

impl Effect {
    pub fn emit(frame: Frame) -> Self {
        Effect::Emit(frame)
    }
}
