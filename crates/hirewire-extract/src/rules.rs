// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword tables driving the extractor.
//!
//! Tables are ordered slices. Lookups walk them front to back and the first
//! matching entry wins, so earlier rows take precedence.

use hirewire_core::{QuestionCategory, QuestionPriority};

/// Agent phrases that promise an HR follow-up. Matched as lower-cased substrings.
pub const ESCALATION_PHRASES: &[&str] = &[
    "i'll note that for hr",
    "i will note that for hr",
    "hr will get back to you",
    "our hr team will get back to you",
    "i'll escalate that",
    "i will escalate that",
    "i'll pass that to hr",
    "i will pass that to hr",
    "i'll share that with hr",
    "i will share that with hr",
    "hr will follow up",
    "hr can follow up",
];

/// Openers that mark a user turn as a question even without a trailing `?`.
pub const QUESTION_STARTS: &[&str] = &[
    "can ", "could ", "what ", "how ", "when ", "where ", "why ", "who ", "do ", "does ", "is ",
    "are ", "will ", "would ", "should ",
];

pub const CATEGORY_KEYWORDS: &[(QuestionCategory, &[&str])] = &[
    (
        QuestionCategory::Benefits,
        &["insurance", "health", "leave", "vacation", "pto", "benefit"],
    ),
    (
        QuestionCategory::Salary,
        &["salary", "bonus", "compensation", "pay", "raise"],
    ),
    (
        QuestionCategory::Policies,
        &["remote", "hours", "flexible", "policy", "dress code"],
    ),
    (
        QuestionCategory::Legal,
        &["contract", "probation", "notice", "termination", "gratuity"],
    ),
    (
        QuestionCategory::Relocation,
        &["visa", "housing", "relocation", "move"],
    ),
    (
        QuestionCategory::Team,
        &["team", "manager", "culture", "colleagues"],
    ),
    (
        QuestionCategory::Growth,
        &["training", "promotion", "career", "development"],
    ),
];

pub const PRIORITY_KEYWORDS: &[(QuestionPriority, &[&str])] = &[
    (
        QuestionPriority::Urgent,
        &["urgent", "asap", "immediately", "today"],
    ),
    (QuestionPriority::High, &["soon", "important", "critical"]),
];

/// Lower-cases and folds typographic apostrophes to ASCII.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

/// Whether an agent utterance promises an HR follow-up.
pub fn is_escalation(text: &str) -> bool {
    let text = normalize(text);
    ESCALATION_PHRASES.iter().any(|p| text.contains(p))
}

/// Whether a user utterance reads as a question.
pub fn looks_like_question(text: &str) -> bool {
    let text = normalize(text.trim());
    text.ends_with('?') || QUESTION_STARTS.iter().any(|s| text.starts_with(s))
}

fn first_match<T: Copy>(table: &[(T, &[&str])], text: &str) -> Option<T> {
    let text = normalize(text);
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(value, _)| *value)
}

pub fn categorize(question: &str) -> QuestionCategory {
    first_match(CATEGORY_KEYWORDS, question).unwrap_or(QuestionCategory::General)
}

pub fn assess_priority(question: &str) -> QuestionPriority {
    first_match(PRIORITY_KEYWORDS, question).unwrap_or(QuestionPriority::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_matches_case_insensitively() {
        assert!(is_escalation("Good question! I'll note that for HR."));
        assert!(is_escalation("Our HR team will get back to you on that"));
        assert!(!is_escalation("Let me check the handbook."));
    }

    #[test]
    fn escalation_accepts_typographic_apostrophe() {
        assert!(is_escalation("I\u{2019}ll escalate that right away"));
    }

    #[test]
    fn question_detection() {
        assert!(looks_like_question("Is the office open on Fridays"));
        assert!(looks_like_question("parking available?"));
        assert!(looks_like_question("  Who is my manager  "));
        assert!(!looks_like_question("I need a parking spot."));
        assert!(!looks_like_question("Isolation is tough."));
    }

    #[test]
    fn categories_follow_table_order() {
        // "health" (benefits) outranks "team" (team).
        assert_eq!(
            categorize("Does the team get health cover?"),
            QuestionCategory::Benefits
        );
        assert_eq!(categorize("When is the bonus paid?"), QuestionCategory::Salary);
        assert_eq!(categorize("Is there a dress code?"), QuestionCategory::Policies);
        assert_eq!(categorize("How long is probation?"), QuestionCategory::Legal);
        assert_eq!(categorize("Will you sponsor my visa?"), QuestionCategory::Relocation);
        assert_eq!(categorize("Who is my manager?"), QuestionCategory::Team);
        assert_eq!(categorize("Is there training budget?"), QuestionCategory::Growth);
        assert_eq!(categorize("Where do I park?"), QuestionCategory::General);
    }

    #[test]
    fn urgent_outranks_high() {
        assert_eq!(
            assess_priority("This is important, I need it today"),
            QuestionPriority::Urgent
        );
        assert_eq!(assess_priority("Need it soon please"), QuestionPriority::High);
        assert_eq!(assess_priority("Whenever works"), QuestionPriority::Normal);
    }
}
