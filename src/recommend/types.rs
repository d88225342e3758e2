//! Request and response bodies of the recommendation service

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Tweak sent when the user asks for a variation
pub const ANOTHER_OPTION_TWEAK: &str = "another option";

/// Outbound request body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationRequest {
    pub area: String,
    pub energy: String,
    pub time_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweak: Option<String>,
}

impl RecommendationRequest {
    pub fn new(area: impl Into<String>, energy: impl Into<String>, time_minutes: u32) -> Self {
        Self {
            area: area.into(),
            energy: energy.into(),
            time_minutes,
            tweak: None,
        }
    }

    pub fn with_tweak(mut self, tweak: impl Into<String>) -> Self {
        self.tweak = Some(tweak.into());
        self
    }
}

/// Response body. Every field is optional; blank strings count as absent.
/// A field of the wrong type is dropped, not treated as a malformed body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "lenient_text")]
    pub next_move: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message_draft: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rationale: Option<String>,
    #[serde(default, deserialize_with = "lenient_hours")]
    pub checkin_window_hours: Option<f64>,
}

impl Recommendation {
    #[allow(dead_code)] // Constructor used by tests
    pub fn with_next_move(next_move: impl Into<String>) -> Self {
        Self {
            next_move: Some(next_move.into()),
            ..Self::default()
        }
    }

    pub fn next_move(&self) -> Option<&str> {
        non_blank(self.next_move.as_deref())
    }

    pub fn message_draft(&self) -> Option<&str> {
        non_blank(self.message_draft.as_deref())
    }

    pub fn rationale(&self) -> Option<&str> {
        non_blank(self.rationale.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Strings as-is, numbers and booleans in their JSON spelling
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
        other => {
            tracing::debug!(value = %other, "Dropping non-text recommendation field");
            None
        }
    })
}

/// A number, or a string holding one
fn lenient_hours<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let hours = match &value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if hours.is_none() {
        tracing::debug!(%value, "Dropping unreadable checkin_window_hours");
    }
    Ok(hours)
}
