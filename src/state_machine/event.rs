//! Events sent by the client

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Which conversational step the client is advancing to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTag {
    Start,
    SetArea,
    SetEnergy,
    SetTime,
    Another,
    OpenLogin,
    /// Anything else; handled as a restart
    Unrecognized(String),
}

impl EventTag {
    pub fn parse(name: &str) -> Self {
        match name {
            "start" => EventTag::Start,
            "set_area" => EventTag::SetArea,
            "set_energy" => EventTag::SetEnergy,
            "set_time" => EventTag::SetTime,
            "another" => EventTag::Another,
            "open_login" => EventTag::OpenLogin,
            other => EventTag::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventTag::Start => "start",
            EventTag::SetArea => "set_area",
            EventTag::SetEnergy => "set_energy",
            EventTag::SetTime => "set_time",
            EventTag::Another => "another",
            EventTag::OpenLogin => "open_login",
            EventTag::Unrecognized(name) => name,
        }
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EventTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One inbound step: the event name plus the user's selection for it
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub tag: EventTag,
    /// Usually `{ "value": ... }`; shape is not trusted
    pub payload: Value,
}

impl Event {
    pub fn new(name: &str, payload: Value) -> Self {
        Self {
            tag: EventTag::parse(name),
            payload,
        }
    }

    pub fn start() -> Self {
        Self {
            tag: EventTag::Start,
            payload: Value::Object(serde_json::Map::new()),
        }
    }
}
