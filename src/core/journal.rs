// src/core/journal.rs — Private, session-scoped journal notes

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::infra::errors::CompanionError;

pub const SAVED_MESSAGE: &str = "Entry saved privately.";

#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub written_at: DateTime<Local>,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a note. Blank notes are rejected.
    pub fn save(&mut self, text: &str) -> Result<&JournalEntry, CompanionError> {
        if text.trim().is_empty() {
            return Err(CompanionError::Validation(
                "Journal entry cannot be empty".into(),
            ));
        }
        self.entries.push(JournalEntry {
            written_at: Local::now(),
            text: text.to_string(),
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
