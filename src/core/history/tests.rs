//! History module tests.

use super::{EntryKind, HistoryEntry, SessionHistory};

fn questions(history: &SessionHistory) -> Vec<&str> {
    history
        .entries()
        .iter()
        .map(|e| e.question.as_str())
        .collect()
}

#[test]
fn new_history_is_empty() {
    let history = SessionHistory::new();
    assert!(history.is_empty());
    assert_eq!(history.len(), 0);
    assert!(history.get(0).is_none());
}

#[test]
fn image_and_speech_entries_are_appended() {
    let mut history = SessionHistory::new();
    history.record(HistoryEntry::new(EntryKind::Image, "Triangles", "a"));
    history.record(HistoryEntry::new(EntryKind::Speech, "what is pi", "b"));
    history.record(HistoryEntry::new(EntryKind::Image, "Vectors", "c"));
    assert_eq!(questions(&history), vec!["Triangles", "what is pi", "Vectors"]);
}

#[test]
fn doubts_are_prepended() {
    let mut history = SessionHistory::new();
    history.record(HistoryEntry::new(EntryKind::Doubt, "first", "a"));
    history.record(HistoryEntry::new(EntryKind::Doubt, "second", "b"));
    assert_eq!(questions(&history), vec!["second", "first"]);
}

#[test]
fn mixed_kinds_keep_their_own_ordering() {
    let mut history = SessionHistory::new();
    history.record(HistoryEntry::new(EntryKind::Image, "img", "a"));
    history.record(HistoryEntry::new(EntryKind::Doubt, "doubt", "b"));
    history.record(HistoryEntry::new(EntryKind::Speech, "spoken", "c"));
    assert_eq!(questions(&history), vec!["doubt", "img", "spoken"]);
}

#[test]
fn record_returns_landing_index() {
    let mut history = SessionHistory::new();
    assert_eq!(history.record(HistoryEntry::new(EntryKind::Image, "img", "a")), 0);
    assert_eq!(history.record(HistoryEntry::new(EntryKind::Speech, "spoken", "b")), 1);
    assert_eq!(history.record(HistoryEntry::new(EntryKind::Doubt, "doubt", "c")), 0);
    assert_eq!(history.record(HistoryEntry::new(EntryKind::Image, "img2", "d")), 3);
}

#[test]
fn display_solution_is_flattened() {
    let entry = HistoryEntry::new(EntryKind::Image, "Sets", "**Union**\n\n\n* A or B");
    assert_eq!(entry.display_solution(), "Union\n- A or B");
    assert_eq!(entry.solution, "**Union**\n\n\n* A or B");
}

#[test]
fn entry_serializes_with_type_field() {
    let entry = HistoryEntry::new(EntryKind::Doubt, "2+2?", "4");
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"type": "doubt", "question": "2+2?", "solution": "4"})
    );
}
