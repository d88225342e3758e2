//! Per-request runtime
//!
//! Runs the state machine's effects in order, pushing frames through a
//! single emitter that always ends with exactly one `End`.

mod emitter;
mod executor;

#[cfg(test)]
pub mod testing;

pub use emitter::{EmitError, FrameEmitter};
pub use executor::{spawn_request, ConversationRuntime};

use crate::recommend::LoggingClient;

/// Runtime wired to the real recommendation service
pub type ProductionRuntime = ConversationRuntime<LoggingClient>;
