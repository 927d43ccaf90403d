//! Calculation history.
//!
//! Every successful keypad evaluation and every answered AI prompt appends
//! one entry. The log is newest-first, append-only, and cleared only by an
//! explicit user action. Constructors take `SystemTime`; callers own the
//! clock.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::ids::HistoryId;

/// Which mode produced a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Standard,
    Ai,
}

impl EntryKind {
    #[must_use]
    pub fn badge(self) -> &'static str {
        match self {
            EntryKind::Standard => "CALC",
            EntryKind::Ai => "AI",
        }
    }
}

/// A record of one completed calculation, standard or AI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    id: HistoryId,
    expression: String,
    result: String,
    timestamp: SystemTime,
    kind: EntryKind,
}

impl HistoryItem {
    #[must_use]
    pub fn id(&self) -> HistoryId {
        self.id
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    #[must_use]
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }
}

/// Newest-first, append-only history for the session.
///
/// Owned by the top-level application state; calculator and chat views read
/// it but never mutate entries.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryItem>,
    next_id: u64,
}

impl HistoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the front and return its id.
    pub fn push(
        &mut self,
        expression: impl Into<String>,
        result: impl Into<String>,
        kind: EntryKind,
        timestamp: SystemTime,
    ) -> HistoryId {
        let id = HistoryId::new(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            0,
            HistoryItem {
                id,
                expression: expression.into(),
                result: result.into(),
                timestamp,
                kind,
            },
        );
        id
    }

    /// Remove all entries. Ids keep counting up so a cleared-then-reused
    /// log never reissues an id.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryItem] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryItem> {
        self.entries.get(index)
    }
}
