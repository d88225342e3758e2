//! Request executor

use super::{EmitError, FrameEmitter};
use crate::recommend::RecommendationClient;
use crate::state_machine::transition::SNAG_MESSAGE;
use crate::state_machine::{
    recommendation_frames, transition, ConversationState, Effect, Event, Frame,
};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Runs one transition per request against a recommendation backend
pub struct ConversationRuntime<C>
where
    C: RecommendationClient + 'static,
{
    client: C,
}

impl<C> ConversationRuntime<C>
where
    C: RecommendationClient + 'static,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Handle one event: emit every frame the transition calls for, then `End`.
    pub async fn handle(
        &self,
        event: &Event,
        state: &ConversationState,
        emitter: &FrameEmitter,
    ) -> Result<(), EmitError> {
        let result = transition(event, state);
        tracing::debug!(
            event = %event.tag,
            effects = result.effects.len(),
            state_update = ?result.state_update,
            "Transition"
        );

        for effect in result.effects {
            self.execute(effect, emitter).await?;
        }

        emitter.emit(Frame::End).await
    }

    async fn execute(&self, effect: Effect, emitter: &FrameEmitter) -> Result<(), EmitError> {
        match effect {
            Effect::Emit(frame) => emitter.emit(frame).await,
            Effect::Recommend { request, flow } => {
                emitter.emit(Frame::typing(true)).await?;

                let outcome = tokio::select! {
                    outcome = self.client.recommend(&request) => outcome,
                    () = emitter.closed() => return Err(EmitError::Disconnected),
                };

                emitter.emit(Frame::typing(false)).await?;

                for frame in recommendation_frames(flow, &request, &outcome) {
                    emitter.emit(frame).await?;
                }
                Ok(())
            }
        }
    }
}

/// Run a request on its own task.
///
/// A panic inside the handler is contained: if `End` was not yet written, the
/// client gets a generic apology and `End`, with any open typing indicator
/// switched off first. A vanished client just ends the task.
pub fn spawn_request<C>(
    runtime: Arc<ConversationRuntime<C>>,
    event: Event,
    state: ConversationState,
    emitter: FrameEmitter,
) -> JoinHandle<()>
where
    C: RecommendationClient + 'static,
{
    tokio::spawn(async move {
        let worker_emitter = emitter.clone();
        let worker =
            tokio::spawn(async move { runtime.handle(&event, &state, &worker_emitter).await });

        match worker.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Request abandoned");
            }
            Err(e) => {
                tracing::error!(error = %e, "Request handler failed");
                if emitter.is_finished() {
                    return;
                }
                if let Err(e) = finish_with_apology(&emitter).await {
                    tracing::debug!(error = %e, "Could not deliver apology");
                }
            }
        }
    })
}

async fn finish_with_apology(emitter: &FrameEmitter) -> Result<(), EmitError> {
    if emitter.is_typing() {
        emitter.emit(Frame::typing(false)).await?;
    }
    emitter.emit(Frame::bot(SNAG_MESSAGE)).await?;
    emitter.emit(Frame::End).await
}
