// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for question extraction.

use std::collections::HashSet;

use hirewire_core::Turn;
use hirewire_extract::extract_questions;
use hirewire_extract::rules::looks_like_question;
use proptest::prelude::*;

fn turn_strategy() -> impl Strategy<Value = Turn> {
    let role = prop_oneof![
        Just(Some("agent".to_string())),
        Just(Some("user".to_string())),
        Just(Some("tool".to_string())),
        Just(None),
    ];
    let message = prop_oneof![
        Just("I'll note that for HR.".to_string()),
        Just("HR will get back to you.".to_string()),
        Just("Can I work remotely?".to_string()),
        Just("can i work remotely?".to_string()),
        Just("What is the bonus structure?".to_string()),
        Just("Is there a relocation package, this is urgent?".to_string()),
        Just("Thanks.".to_string()),
        Just("   ".to_string()),
        "[a-z ?]{0,24}",
    ];
    (role, proptest::option::of(message)).prop_map(|(role, message)| Turn {
        role,
        message,
        time_in_call_secs: None,
    })
}

proptest! {
    #[test]
    fn output_is_deduplicated(turns in prop::collection::vec(turn_strategy(), 0..24)) {
        let out = extract_questions(&turns);
        let keys: HashSet<String> = out.iter().map(|q| q.question.trim().to_lowercase()).collect();
        prop_assert_eq!(keys.len(), out.len());
    }

    #[test]
    fn every_question_is_a_user_turn(turns in prop::collection::vec(turn_strategy(), 0..24)) {
        let out = extract_questions(&turns);
        for q in &out {
            prop_assert!(looks_like_question(&q.question));
            prop_assert!(turns.iter().any(|t| t.has_role("user") && t.text() == q.question));
        }
    }

    #[test]
    fn no_agent_turns_means_no_output(turns in prop::collection::vec(turn_strategy(), 0..24)) {
        let without_agent: Vec<Turn> = turns.into_iter().filter(|t| !t.has_role("agent")).collect();
        prop_assert!(extract_questions(&without_agent).is_empty());
    }

    #[test]
    fn extraction_is_deterministic(turns in prop::collection::vec(turn_strategy(), 0..24)) {
        prop_assert_eq!(extract_questions(&turns), extract_questions(&turns));
    }

    #[test]
    fn output_never_exceeds_escalation_count(turns in prop::collection::vec(turn_strategy(), 0..24)) {
        let escalations = turns
            .iter()
            .filter(|t| t.has_role("agent") && hirewire_extract::rules::is_escalation(t.text()))
            .count();
        prop_assert!(extract_questions(&turns).len() <= escalations);
    }
}

#[test]
fn serializes_with_snake_case_enums() {
    let turns = vec![
        Turn::new("user", "Is there a relocation package available, this is urgent?"),
        Turn::new("agent", "I\u{2019}ll note that for HR."),
    ];
    let out = extract_questions(&turns);
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json[0]["category"], "relocation");
    assert_eq!(json[0]["priority"], "urgent");
}
