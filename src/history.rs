//! Session-scoped explanation history
//!
//! Entries live for one session only: newest first, never mutated, never
//! removed, never written to disk. Each session owns its own `SessionHistory`.

use crate::analysis::StaticHighlights;
use crate::decode::ExplanationRecord;
use crate::sample::CodeSample;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use uuid::Uuid;

/// One successful explain action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub sample: CodeSample,
    pub highlights: StaticHighlights,
    pub result: ExplanationRecord,
}

impl HistoryEntry {
    pub fn new(sample: CodeSample, highlights: StaticHighlights, result: ExplanationRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            sample,
            highlights,
            result,
        }
    }

    /// One-line label for lists
    pub fn title(&self) -> String {
        let first_line = self
            .sample
            .source()
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("");
        format!("{} · {}", self.sample.language(), first_line)
    }
}

/// Newest-first list of entries for one session
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: VecDeque<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the front
    pub fn append(&mut self, entry: HistoryEntry) {
        tracing::debug!(id = %entry.id, total = self.entries.len() + 1, "history entry added");
        self.entries.push_front(entry);
    }

    /// All entries, newest first
    pub fn all(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> + DoubleEndedIterator {
        self.entries.iter()
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
