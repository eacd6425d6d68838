// src/api/types.rs

use serde::{Deserialize, Serialize};

use crate::core::journal::JournalEntry;
use crate::core::resources::{BreathingPattern, Helpline};

/// Request body for a chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Response for a completed chat turn.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub reply: String,
    /// Completed turns in this session, including this one.
    pub turns: usize,
}

/// Response for a task toggle.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskToggled {
    pub name: String,
    pub done: bool,
}

/// Request body for a journal note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct JournalSaved {
    pub message: String,
    pub entry: JournalEntry,
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub breathing: BreathingPattern,
    pub helplines: &'static [Helpline],
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
