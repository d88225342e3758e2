//! Pure state transition function
//!
//! One handler per event tag. Missing answers never produce an error frame:
//! the conversation falls back to the restart sequence instead.

use super::frame::OPEN_LOGIN_TOOL;
use super::state::{text_value, Answers, Area, Energy, TIME_OPTIONS};
use super::{Chip, ConversationState, Effect, Event, EventTag, Field, Frame, RecommendFlow};
use crate::recommend::{
    Recommendation, RecommendError, RecommendationRequest, ANOTHER_OPTION_TWEAK,
};
use crate::sanitize::escape_html;
use serde_json::{json, Value};

const INTRO_HTML: &str = "<strong>I'm here to give you a gentle nudge.</strong><br/>\
Answer three tiny questions and I’ll suggest a next move you can do right now.<br/><br/>\
<strong>Which part of life needs a nudge today?</strong>";

const TIME_QUESTION_HTML: &str = "<strong>How much time do you want to spend?</strong>";

const FIRST_MOVE_FAILED: &str = "The suggestion engine hiccuped. Try again?";
const VARIATION_FAILED: &str = "Couldn’t get a variation right now. Try again in a moment?";

/// Apology for faults outside the state machine's control
pub const SNAG_MESSAGE: &str = "I hit a snag. Refresh and try again.";

const PLACEHOLDER: &str = "—";

/// Result of a state transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    pub effects: Vec<Effect>,
    /// Fields this step answers; the client merges them into what it echoes
    pub state_update: ConversationState,
}

impl TransitionResult {
    pub fn new() -> Self {
        Self {
            effects: vec![],
            state_update: ConversationState::default(),
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_frames(mut self, frames: impl IntoIterator<Item = Frame>) -> Self {
        self.effects.extend(frames.into_iter().map(Effect::emit));
        self
    }

    pub fn with_update(mut self, update: ConversationState) -> Self {
        self.state_update = update;
        self
    }
}

impl Default for TransitionResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Map one event plus the echoed state to the frames to show next.
pub fn transition(event: &Event, state: &ConversationState) -> TransitionResult {
    match &event.tag {
        EventTag::Start | EventTag::Unrecognized(_) => restart(),
        EventTag::SetArea => set_area(&event.payload),
        EventTag::SetEnergy => set_energy(&event.payload),
        EventTag::SetTime => set_time(&event.payload, state),
        EventTag::Another => another(&event.payload, state),
        EventTag::OpenLogin => open_login(&event.payload, state),
    }
}

fn restart() -> TransitionResult {
    TransitionResult::new().with_frames(restart_frames())
}

/// Intro bubble and area chips; shared by every path back to square one
pub fn restart_frames() -> [Frame; 2] {
    let chips = Area::ALL
        .iter()
        .map(|area| {
            Chip::new(area.as_str(), json!(area.as_str()), EventTag::SetArea)
                .setting(Field::Area)
        })
        .collect();
    [Frame::bot(INTRO_HTML), Frame::chips(chips)]
}

fn set_area(payload: &Value) -> TransitionResult {
    let Some(area) = payload.get("value").and_then(text_value) else {
        return restart();
    };

    let html = format!(
        "Great — <em>{}</em> it is.<br/><strong>How much energy do you have right now?</strong>",
        escape_html(&area)
    );
    let chips = Energy::ALL
        .iter()
        .map(|energy| {
            Chip::new(energy.label(), json!(energy.as_str()), EventTag::SetEnergy)
                .setting(Field::Energy)
        })
        .collect();

    TransitionResult::new()
        .with_frames([Frame::bot(html), Frame::chips(chips)])
        .with_update(ConversationState {
            area: Some(area),
            ..ConversationState::default()
        })
}

fn set_energy(payload: &Value) -> TransitionResult {
    // Area is expected but not enforced here; set_time re-checks everything
    let energy = ConversationState::default()
        .resolve(payload, Some(Field::Energy))
        .energy;

    let chips = TIME_OPTIONS
        .iter()
        .map(|minutes| {
            Chip::new(
                format!("{minutes} min"),
                json!(minutes.to_string()),
                EventTag::SetTime,
            )
            .setting(Field::Time)
        })
        .collect();

    TransitionResult::new()
        .with_frames([Frame::bot(TIME_QUESTION_HTML), Frame::chips(chips)])
        .with_update(ConversationState {
            energy,
            ..ConversationState::default()
        })
}

fn set_time(payload: &Value, state: &ConversationState) -> TransitionResult {
    let resolved = state.resolve(payload, Some(Field::Time));
    let Some(answers) = resolved.answers() else {
        return restart();
    };

    TransitionResult::new()
        .with_effect(Effect::Recommend {
            request: RecommendationRequest::new(answers.area, answers.energy, answers.time),
            flow: RecommendFlow::FirstMove,
        })
        .with_update(ConversationState {
            time: resolved.time,
            ..ConversationState::default()
        })
}

fn another(payload: &Value, state: &ConversationState) -> TransitionResult {
    let Some(answers) = state.resolve(payload, None).answers() else {
        return restart();
    };

    TransitionResult::new().with_effect(Effect::Recommend {
        request: RecommendationRequest::new(answers.area, answers.energy, answers.time)
            .with_tweak(ANOTHER_OPTION_TWEAK),
        flow: RecommendFlow::Variation,
    })
}

fn open_login(payload: &Value, state: &ConversationState) -> TransitionResult {
    let Some(answers) = state.resolve(payload, None).answers() else {
        return restart();
    };

    TransitionResult::new().with_frames([Frame::tool(OPEN_LOGIN_TOOL, answers.to_value())])
}

/// Frames that report the outcome of a recommendation call.
///
/// A failed call renders a fixed apology: nothing from a failed response is
/// shown. Only the first-move path offers a restart chip.
pub fn recommendation_frames(
    flow: RecommendFlow,
    request: &RecommendationRequest,
    outcome: &Result<Recommendation, RecommendError>,
) -> Vec<Frame> {
    let rec = match outcome {
        Ok(rec) => rec,
        Err(_) => {
            return match flow {
                RecommendFlow::FirstMove => vec![
                    Frame::bot(FIRST_MOVE_FAILED),
                    Frame::chips(vec![Chip::new("Restart", Value::Null, EventTag::Start)]),
                ],
                RecommendFlow::Variation => vec![Frame::bot(VARIATION_FAILED)],
            };
        }
    };

    let (headline, another_label) = match flow {
        RecommendFlow::FirstMove => ("Next move", "Give me another option"),
        RecommendFlow::Variation => ("Another option", "Something else"),
    };

    let text = render_recommendation(headline, rec);
    let answers = Answers {
        area: request.area.clone(),
        energy: request.energy.clone(),
        time: request.time_minutes,
    }
    .to_value();

    vec![
        Frame::bot(format!("<pre>{}</pre>", escape_html(&text))),
        Frame::chips(vec![
            Chip::new("Save & track (login)", answers.clone(), EventTag::OpenLogin),
            Chip::new(another_label, answers, EventTag::Another),
        ]),
    ]
}

/// Plain-text body of a recommendation bubble, before escaping
fn render_recommendation(headline: &str, rec: &Recommendation) -> String {
    let mut sections = vec![format!(
        "**{headline}**\n{}",
        rec.next_move().unwrap_or(PLACEHOLDER)
    )];
    if let Some(draft) = rec.message_draft() {
        sections.push(format!("**Draft**\n{draft}"));
    }
    if let Some(why) = rec.rationale() {
        sections.push(format!("**Why**\n{why}"));
    }
    sections.join("\n\n").trim().to_string()
}
