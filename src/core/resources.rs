// src/core/resources.rs — Static self-help content: breathing pattern and helplines

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreathStep {
    pub phase: BreathPhase,
    pub seconds: u32,
    pub cue: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreathingPattern {
    pub name: &'static str,
    pub description: &'static str,
    pub steps: Vec<BreathStep>,
    /// Suggested repetitions for one guided session.
    pub rounds: u32,
}

impl BreathingPattern {
    /// Length of one cycle in seconds.
    pub fn cycle_seconds(&self) -> u32 {
        self.steps.iter().map(|s| s.seconds).sum()
    }

    pub fn total_seconds(&self) -> u32 {
        self.cycle_seconds() * self.rounds
    }
}

/// The 4-7-8 technique.
pub fn four_seven_eight() -> BreathingPattern {
    BreathingPattern {
        name: "4-7-8",
        description: "Breathe in for 4s, hold for 7s, exhale for 8s.",
        steps: vec![
            BreathStep {
                phase: BreathPhase::Inhale,
                seconds: 4,
                cue: "Breathe in...",
            },
            BreathStep {
                phase: BreathPhase::Hold,
                seconds: 7,
                cue: "Hold...",
            },
            BreathStep {
                phase: BreathPhase::Exhale,
                seconds: 8,
                cue: "Breathe out...",
            },
        ],
        rounds: 3,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Helpline {
    pub name: &'static str,
    pub phone: &'static str,
}

pub const HELPLINES: &[Helpline] = &[
    Helpline {
        name: "National Helpline",
        phone: "9152987821",
    },
    Helpline {
        name: "Vandrevala Foundation",
        phone: "9999666555",
    },
    Helpline {
        name: "Aasra",
        phone: "9820466726",
    },
];
