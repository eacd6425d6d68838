// src/core/mod.rs — Companion domain: transcript, mood, tasks, journal, and turn handling

pub mod conversation;
pub mod journal;
pub mod mood;
pub mod resources;
pub mod session;
pub mod system_prompt;
pub mod tasks;
pub mod turn;
