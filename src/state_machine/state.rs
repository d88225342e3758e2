//! Conversation state echoed by the client

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Answers collected so far. Held by the client and sent back on every call;
/// any field may be missing at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub area: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub energy: Option<String>,
    /// Minutes the user wants to spend
    #[serde(
        default,
        deserialize_with = "lenient_minutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<u32>,
}

/// State keys a chip can ask the client to set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Area,
    Energy,
    Time,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::Area => "area",
            Field::Energy => "energy",
            Field::Time => "time",
        }
    }
}

/// Life areas offered on the first question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Work,
    Health,
    Relationships,
}

impl Area {
    pub const ALL: [Area; 3] = [Area::Work, Area::Health, Area::Relationships];

    pub fn as_str(self) -> &'static str {
        match self {
            Area::Work => "Work",
            Area::Health => "Health",
            Area::Relationships => "Relationships",
        }
    }
}

/// Energy levels offered on the second question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Energy {
    Low,
    Medium,
    High,
}

impl Energy {
    pub const ALL: [Energy; 3] = [Energy::Low, Energy::Medium, Energy::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Energy::Low => "Low",
            Energy::Medium => "Medium",
            Energy::High => "High",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Energy::Low => "🔋 Low",
            Energy::Medium => "⚡ Medium",
            Energy::High => "🚀 High",
        }
    }
}

/// Time budgets offered on the third question, in minutes
pub const TIME_OPTIONS: [u32; 2] = [5, 15];

/// A fully resolved (area, energy, time) triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    pub area: String,
    pub energy: String,
    pub time: u32,
}

impl Answers {
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "area": self.area,
            "energy": self.energy,
            "time": self.time,
        })
    }
}

impl ConversationState {
    /// Overlay what an event payload carries onto the echoed state.
    ///
    /// Per field, first match wins: a key inside an object-valued
    /// `payload.value`, a top-level payload key, a scalar `payload.value` when
    /// `target` names this field, then the echoed state.
    pub fn resolve(&self, payload: &Value, target: Option<Field>) -> ConversationState {
        ConversationState {
            area: candidates(payload, Field::Area, target)
                .find_map(text_value)
                .or_else(|| self.area.clone()),
            energy: candidates(payload, Field::Energy, target)
                .find_map(text_value)
                .or_else(|| self.energy.clone()),
            time: candidates(payload, Field::Time, target)
                .find_map(minutes_value)
                .or(self.time),
        }
    }

    /// All three answers, if present
    pub fn answers(&self) -> Option<Answers> {
        Some(Answers {
            area: self.area.clone()?,
            energy: self.energy.clone()?,
            time: self.time?,
        })
    }
}

/// Payload values that may answer `field`, highest precedence first
fn candidates<'a>(
    payload: &'a Value,
    field: Field,
    target: Option<Field>,
) -> impl Iterator<Item = &'a Value> {
    let value = payload.get("value");
    let nested = value
        .filter(|v| v.is_object())
        .and_then(|v| v.get(field.key()));
    let top_level = payload.get(field.key());
    let targeted = value.filter(|v| !v.is_object() && target == Some(field));

    [nested, top_level, targeted].into_iter().flatten()
}

/// Non-empty string, trimmed
pub fn text_value(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Positive whole minutes, as a number or numeric string
pub fn minutes_value(value: &Value) -> Option<u32> {
    let minutes = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (minutes > 0).then_some(minutes)
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(text_value(&Value::deserialize(deserializer)?))
}

fn lenient_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(minutes_value(&Value::deserialize(deserializer)?))
}
