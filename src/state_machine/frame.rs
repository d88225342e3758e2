//! Display instructions pushed to the client

use super::{EventTag, Field};
use serde::Serialize;
use serde_json::Value;

/// Tool name that asks the client to open its login surface
pub const OPEN_LOGIN_TOOL: &str = "open_login";

/// Who a bubble is from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Bot,
}

/// One unit of streamed output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    /// Chat message; `html` is inline markup with untrusted parts escaped
    Bubble { role: Role, html: String },
    /// Options for the next event
    #[serde(rename = "chips")]
    ChipSet { options: Vec<Chip> },
    /// Waiting indicator around a slow call
    Typing { on: bool },
    /// Side-channel instruction, not a chat message
    Tool { name: String, payload: Value },
    /// Terminal marker, always last
    End,
}

/// A selectable option bound to the event it triggers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chip {
    pub label: String,
    pub value: Value,
    pub event: EventTag,
    /// State key the client stores `value` under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<Field>,
}

impl Chip {
    pub fn new(label: impl Into<String>, value: Value, event: EventTag) -> Self {
        Self {
            label: label.into(),
            value,
            event,
            set: None,
        }
    }

    pub fn setting(mut self, field: Field) -> Self {
        self.set = Some(field);
        self
    }
}

impl Frame {
    pub fn bot(html: impl Into<String>) -> Self {
        Frame::Bubble {
            role: Role::Bot,
            html: html.into(),
        }
    }

    pub fn chips(options: Vec<Chip>) -> Self {
        Frame::ChipSet { options }
    }

    pub fn typing(on: bool) -> Self {
        Frame::Typing { on }
    }

    pub fn tool(name: impl Into<String>, payload: Value) -> Self {
        Frame::Tool {
            name: name.into(),
            payload,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Frame::End)
    }

    /// Wire encoding: one JSON object per frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
