//! Conversation state machine
//!
//! Stateless on the server: every transition is derived from the event name
//! and the state the client echoes back. The transition itself is pure; the
//! one external call it needs is described as an effect for the runtime.

mod effect;
pub mod event;
pub mod frame;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, RecommendFlow};
pub use event::{Event, EventTag};
pub use frame::{Chip, Frame};
pub use state::{ConversationState, Field};
pub use transition::{recommendation_frames, transition, TransitionResult};
