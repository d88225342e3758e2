//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across arbitrary events and states.

use super::transition::restart_frames;
use super::*;
use crate::recommend::{Recommendation, RecommendError, RecommendationRequest};
use crate::sanitize::has_markup_metachar;
use proptest::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_text() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Work".to_string())),
        Just(Some("Health".to_string())),
        "[a-zA-Z<>&\"' ]{1,12}".prop_map(Some),
    ]
}

fn arb_state() -> impl Strategy<Value = ConversationState> {
    (arb_text(), arb_text(), prop::option::of(1u32..120)).prop_map(|(area, energy, time)| {
        ConversationState { area, energy, time }
    })
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("5")),
        Just(json!(15)),
        Just(json!("Work")),
        "[a-z<>&]{0,8}".prop_map(Value::String),
        any::<i64>().prop_map(|n| json!(n)),
    ]
}

fn arb_payload() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!({})),
        arb_scalar().prop_map(|v| json!({ "value": v })),
        (arb_scalar(), arb_scalar(), arb_scalar()).prop_map(|(a, e, t)| {
            json!({ "value": { "area": a, "energy": e, "time": t } })
        }),
        arb_scalar(),
    ]
}

fn arb_event_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("start".to_string()),
        Just("set_area".to_string()),
        Just("set_energy".to_string()),
        Just("set_time".to_string()),
        Just("another".to_string()),
        Just("open_login".to_string()),
        "[a-z_]{0,12}",
    ]
}

fn emitted(result: &TransitionResult) -> Vec<Frame> {
    result
        .effects
        .iter()
        .filter_map(|e| match e {
            Effect::Emit(frame) => Some(frame.clone()),
            Effect::Recommend { .. } => None,
        })
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Every transition has something to do, and never emits End itself
    #[test]
    fn transition_is_never_empty(
        name in arb_event_name(),
        payload in arb_payload(),
        state in arb_state(),
    ) {
        let result = transition(&Event::new(&name, payload), &state);
        prop_assert!(!result.effects.is_empty());
        prop_assert!(!emitted(&result).iter().any(Frame::is_end));
    }

    /// Same inputs, same output: retries are safe
    #[test]
    fn transition_is_deterministic(
        name in arb_event_name(),
        payload in arb_payload(),
        state in arb_state(),
    ) {
        let event = Event::new(&name, payload);
        prop_assert_eq!(transition(&event, &state), transition(&event, &state));
    }

    /// Unknown tags always produce the start sequence
    #[test]
    fn unrecognized_event_restarts(
        name in "[a-z_]{0,12}",
        payload in arb_payload(),
        state in arb_state(),
    ) {
        prop_assume!(matches!(EventTag::parse(&name), EventTag::Unrecognized(_)));
        let result = transition(&Event::new(&name, payload), &state);
        prop_assert_eq!(emitted(&result), restart_frames().to_vec());
        prop_assert_eq!(result.state_update, ConversationState::default());
    }

    /// At most one external call per request, only from set_time/another
    #[test]
    fn recommend_only_from_recommending_steps(
        name in arb_event_name(),
        payload in arb_payload(),
        state in arb_state(),
    ) {
        let event = Event::new(&name, payload);
        let result = transition(&event, &state);
        let calls = result
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::Recommend { .. }))
            .count();
        prop_assert!(calls <= 1);
        if calls == 1 {
            prop_assert!(matches!(event.tag, EventTag::SetTime | EventTag::Another));
        }
    }

    /// Payload overrides only the field it targets
    #[test]
    fn set_time_keeps_state_area_and_energy(
        area in "[A-Za-z]{1,10}",
        energy in "[A-Za-z]{1,10}",
        minutes in 1u32..240,
    ) {
        let state = ConversationState {
            area: Some(area.clone()),
            energy: Some(energy.clone()),
            time: None,
        };
        let result = transition(
            &Event::new("set_time", json!({ "value": minutes.to_string() })),
            &state,
        );
        let request = result.effects.iter().find_map(|e| match e {
            Effect::Recommend { request, .. } => Some(request.clone()),
            Effect::Emit(_) => None,
        });
        prop_assert_eq!(request, Some(RecommendationRequest::new(area, energy, minutes)));
    }

    /// Failed calls never leak markup into bubbles, whatever the service said
    #[test]
    fn failure_bubbles_have_no_raw_markup(
        message in ".{0,40}",
        code in 400u16..600,
        variation in any::<bool>(),
    ) {
        let flow = if variation { RecommendFlow::Variation } else { RecommendFlow::FirstMove };
        let request = RecommendationRequest::new("Work", "Low", 5);
        let outcome: Result<Recommendation, RecommendError> =
            Err(RecommendError::status(code, message));
        for frame in recommendation_frames(flow, &request, &outcome) {
            if let Frame::Bubble { html, .. } = frame {
                prop_assert!(!has_markup_metachar(&html));
            }
        }
    }

    /// Service text is escaped inside the <pre> wrapper
    #[test]
    fn success_bubble_body_is_escaped(
        next_move in ".{0,40}",
        rationale in prop::option::of(".{0,40}"),
    ) {
        let request = RecommendationRequest::new("Work", "Low", 5);
        let rec = Recommendation {
            next_move: Some(next_move),
            rationale,
            ..Recommendation::default()
        };
        let frames = recommendation_frames(RecommendFlow::FirstMove, &request, &Ok(rec));
        let Frame::Bubble { html, .. } = &frames[0] else {
            return Err(TestCaseError::fail("expected bubble first"));
        };
        let body = html
            .strip_prefix("<pre>")
            .and_then(|s| s.strip_suffix("</pre>"));
        prop_assert!(body.is_some_and(|b| !has_markup_metachar(b)));
    }
}
