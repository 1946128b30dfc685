//! Serde shape tests for the API wire types.
//!
//! These pin the JSON contract: field names, optional-field handling,
//! and the case-sensitive orientation literals.

#![allow(clippy::unwrap_used, clippy::panic)]

use kurosu::api::{CandidateJson, CheckRequest, GenerateRequest};
use kurosu_core::{Cell, Grapheme, Orientation};
use serde_json::json;

// =============================================================================
// GENERATE REQUEST SHAPE
// =============================================================================

#[test]
fn generate_request_minimal_json() {
    let request: GenerateRequest = serde_json::from_value(json!({
        "size": 9,
        "candidate_words": [{"answer": "ネコ", "clue": "cat"}]
    }))
    .unwrap();

    assert_eq!(request.size, 9);
    assert_eq!(request.title, None);
    assert_eq!(request.seed, None);
    assert_eq!(request.candidate_words.len(), 1);
    assert_eq!(request.candidate_words[0].article_ref, None);
}

#[test]
fn generate_request_full_json() {
    let request: GenerateRequest = serde_json::from_value(json!({
        "size": 11,
        "title": "today's news",
        "seed": 7,
        "candidate_words": [
            {"answer": "ウクライナ", "clue": "country", "article_ref": "rss-123"}
        ]
    }))
    .unwrap();

    assert_eq!(request.title.as_deref(), Some("today's news"));
    assert_eq!(request.seed, Some(7));
    assert_eq!(
        request.candidate_words[0].article_ref.as_deref(),
        Some("rss-123")
    );
}

#[test]
fn generate_request_missing_candidates_fails_to_parse() {
    let result: Result<GenerateRequest, _> = serde_json::from_value(json!({"size": 9}));
    assert!(result.is_err());
}

#[test]
fn candidate_json_omits_absent_article_ref() {
    let candidate = CandidateJson {
        answer: "ネコ".to_string(),
        clue: "cat".to_string(),
        article_ref: None,
    };
    let json = serde_json::to_string(&candidate).unwrap();
    assert!(!json.contains("article_ref"));
}

// =============================================================================
// CHECK REQUEST SHAPE
// =============================================================================

#[test]
fn check_request_parses_answer_map() {
    let request: CheckRequest = serde_json::from_value(json!({
        "answers": {"1-across": "ねこ", "2-down": "とり"}
    }))
    .unwrap();

    let answers = request.into_answers().unwrap();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers.get("1-across").map(String::as_str), Some("ねこ"));
}

#[test]
fn check_request_without_answers_is_rejected() {
    let request: CheckRequest = serde_json::from_value(json!({})).unwrap();
    assert!(request.into_answers().is_err());
}

// =============================================================================
// CORE WIRE CONVENTIONS
// =============================================================================

#[test]
fn orientation_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&Orientation::Across).unwrap(),
        "\"across\""
    );
    assert_eq!(
        serde_json::to_string(&Orientation::Down).unwrap(),
        "\"down\""
    );
}

#[test]
fn orientation_rejects_wrong_case() {
    assert!(serde_json::from_str::<Orientation>("\"Across\"").is_err());
    assert!(serde_json::from_str::<Orientation>("\"DOWN\"").is_err());
}

#[test]
fn cell_wire_format() {
    let blocked = serde_json::to_value(Cell::Blocked).unwrap();
    assert_eq!(blocked["kind"], "blocked");

    let letter = serde_json::to_value(Cell::Letter {
        grapheme: Grapheme('ネ'),
        number: Some(3),
    })
    .unwrap();
    assert_eq!(letter["kind"], "letter");
    assert_eq!(letter["grapheme"], "ネ");
    assert_eq!(letter["number"], 3);
}
