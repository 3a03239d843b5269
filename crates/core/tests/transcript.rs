//! Tests for transcript entries and replay.

use serde_json::json;
use wcore::{
    Entry, EntryRole, Payload, Transcript, render_transcript,
    testing::{Recorder, Rendered},
};

#[test]
fn roles_follow_body() {
    assert_eq!(Entry::user("hi").role(), EntryRole::User);
    assert_eq!(Entry::assistant("yo").role(), EntryRole::Assistant);
    assert_eq!(
        Entry::tool_result("weather", Payload::Text("Sunny".into())).role(),
        EntryRole::ToolResult
    );
    assert_eq!(
        Entry::tool_start("weather-lookup", json!({})).role(),
        EntryRole::ToolInvocationStart
    );
    assert_eq!(
        Entry::tool_end("weather-lookup", Payload::Text("Sunny".into())).role(),
        EntryRole::ToolInvocationEnd
    );
    assert_eq!(Entry::error("boom").role(), EntryRole::Error);
    assert_eq!(Entry::turn(vec![]).role(), EntryRole::Assistant);
}

#[test]
fn ids_are_unique() {
    let a = Entry::user("same");
    let b = Entry::user("same");
    assert_ne!(a.id(), b.id());
    assert_ne!(a, b);
}

#[test]
fn accessors() {
    let start = Entry::tool_start("restaurant-search", json!({"query": "kimbap"}));
    assert_eq!(start.name(), Some("restaurant-search"));
    assert!(start.payload().is_none());
    assert!(start.text().is_none());

    let end = Entry::tool_end("restaurant-search", Payload::Records(vec![json!({"a": 1})]));
    assert!(matches!(end.payload(), Some(Payload::Records(r)) if r.len() == 1));

    let err = Entry::error("down");
    assert!(err.is_error());
    assert_eq!(err.text(), Some("down"));
}

#[test]
fn push_keeps_order() {
    let mut transcript = Transcript::new();
    let first = transcript.push(Entry::user("one"));
    transcript.push(Entry::assistant("two"));
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.entries()[0].id(), first);
    assert_eq!(transcript.last().and_then(Entry::text), Some("two"));
}

#[test]
fn payload_prompt_text() {
    assert_eq!(Payload::Text("Sunny".into()).to_prompt(), "Sunny");
    let records = Payload::Records(vec![json!({"name": "A"})]);
    assert_eq!(records.to_prompt(), "[\n  {\n    \"name\": \"A\"\n  }\n]");
}

#[test]
fn replay_flattens_turns() {
    let mut transcript = Transcript::new();
    transcript.push(Entry::user("plan a picnic"));
    transcript.push(Entry::turn(vec![
        Entry::tool_start("weather-lookup", json!({})),
        Entry::tool_end("weather-lookup", Payload::Text("Sunny".into())),
        Entry::assistant("Go outside."),
    ]));

    let mut recorder = Recorder::new();
    render_transcript(&transcript, &mut recorder);
    assert_eq!(recorder.events.len(), 4);
    assert!(recorder.texts().is_empty());
    assert!(matches!(&recorder.events[3], Rendered::Entry(e) if e.text() == Some("Go outside.")));
}
