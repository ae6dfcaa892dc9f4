//! Session history of answered questions.
//!
//! Entries live in memory only and are dropped when the session ends. Image and speech
//! answers are appended (newest last) while doubts are prepended (newest first); the two
//! orders are kept as they are rather than unified.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::solution;

/// Input channel a question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Image,
    Speech,
    Doubt,
}

impl EntryKind {
    /// Short label for list views.
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Image => "image",
            EntryKind::Speech => "speech",
            EntryKind::Doubt => "doubt",
        }
    }
}

/// One recorded question with the model's raw solution text.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub question: String,
    pub solution: String,
    #[serde(skip)]
    pub asked_at: DateTime<Local>,
}

impl HistoryEntry {
    pub fn new(kind: EntryKind, question: impl Into<String>, solution: impl Into<String>) -> Self {
        Self {
            kind,
            question: question.into(),
            solution: solution.into(),
            asked_at: Local::now(),
        }
    }

    /// Solution as it is shown or spoken. The raw text is never displayed directly.
    pub fn display_solution(&self) -> String {
        solution::flatten(&self.solution)
    }
}

/// Ordered, in-memory list of answered questions for the current session.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answered question: image/speech entries go last, doubts go first.
    /// Returns the index the entry landed at; entries at or after it moved down by one.
    pub fn record(&mut self, entry: HistoryEntry) -> usize {
        log::debug!(
            "Recording {} entry ({} entries before)",
            entry.kind.label(),
            self.entries.len()
        );
        match entry.kind {
            EntryKind::Image | EntryKind::Speech => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
            EntryKind::Doubt => {
                self.entries.insert(0, entry);
                0
            }
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests;
