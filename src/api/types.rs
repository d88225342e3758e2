//! API request types

use crate::state_machine::{ConversationState, Event};
use serde::Deserialize;
use serde_json::Value;

/// Query string of the agent endpoint. `data` and `state` are JSON text.
#[derive(Debug, Default, Deserialize)]
pub struct AgentQuery {
    pub event: Option<String>,
    pub data: Option<String>,
    pub state: Option<String>,
}

impl AgentQuery {
    /// Decode into an event and echoed state.
    ///
    /// Unparsable `data` or `state` turns the request into a fresh start
    /// rather than failing it.
    pub fn decode(&self) -> (Event, ConversationState) {
        let name = self
            .event
            .as_deref()
            .filter(|e| !e.is_empty())
            .unwrap_or("start");

        let payload = match parse_json(self.data.as_deref()) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(event = %name, error = %e, "Malformed data, restarting");
                return (Event::start(), ConversationState::default());
            }
        };

        let state = match parse_json(self.state.as_deref())
            .and_then(serde_json::from_value::<ConversationState>)
        {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(event = %name, error = %e, "Malformed state, restarting");
                return (Event::start(), ConversationState::default());
            }
        };

        (Event::new(name, payload), state)
    }
}

fn parse_json(raw: Option<&str>) -> Result<Value, serde_json::Error> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => serde_json::from_str(text),
        None => Ok(Value::Object(serde_json::Map::new())),
    }
}
