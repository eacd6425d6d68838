// src/core/system_prompt.rs — Persona prompt and classifier prompt text

use crate::core::mood::MoodLabel;

/// Built-in companion persona.
pub const DEFAULT_PERSONA: &str = "You are a compassionate Mental Health Companion for students \
facing stress and loneliness. Detect sentiment and talk in friendly Hinglish, natural like a \
human friend.";

const REPLY_INSTRUCTION: &str = "Be empathetic and motivational. If the user sounds sad, anxious \
or lonely, respond with extra warmth. Suggest one small, practical relaxation tip in every \
response.";

/// System prompt sent ahead of every reply request.
pub fn build_system_prompt(persona: Option<&str>) -> String {
    let persona = persona
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PERSONA);
    format!("{persona} {REPLY_INSTRUCTION}")
}

/// Single-message prompt asking for exactly one mood label.
pub fn build_classifier_prompt(text: &str) -> String {
    let labels: Vec<&str> = MoodLabel::ALL.iter().map(|l| l.as_str()).collect();
    format!(
        "Analyze sentiment of this text. Return ONLY one word ({}): '{}'",
        labels.join(", "),
        text
    )
}
