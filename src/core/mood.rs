// src/core/mood.rs — Mood vocabulary, level table, and the per-session ledger

use chrono::{DateTime, Local, Timelike};
use serde::Serialize;

/// Chart caption explaining the numeric scale.
pub const LEGEND: &str = "1: Angry | 2: Sad | 3: Anxious | 4: Neutral | 5: Happy";

/// The fixed label set the classifier may answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoodLabel {
    Happy,
    Neutral,
    Anxious,
    Sad,
    Angry,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 5] = [
        MoodLabel::Happy,
        MoodLabel::Neutral,
        MoodLabel::Anxious,
        MoodLabel::Sad,
        MoodLabel::Angry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::Happy => "Happy",
            MoodLabel::Neutral => "Neutral",
            MoodLabel::Anxious => "Anxious",
            MoodLabel::Sad => "Sad",
            MoodLabel::Angry => "Angry",
        }
    }

    /// Exact, case-sensitive match after trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|l| l.as_str() == raw)
    }

    pub fn level(&self) -> MoodLevel {
        MoodLevel(match self {
            MoodLabel::Happy => 5,
            MoodLabel::Neutral => 4,
            MoodLabel::Anxious => 3,
            MoodLabel::Sad => 2,
            MoodLabel::Angry => 1,
        })
    }
}

/// A mood score in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MoodLevel(u8);

impl MoodLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Map a classifier answer to a level; unrecognized answers take `default`.
    pub fn from_label(raw: &str, default: MoodLevel) -> Self {
        match MoodLabel::parse(raw) {
            Some(label) => label.level(),
            None => {
                tracing::debug!(label = raw.trim(), "Unrecognized mood label, using default");
                default
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodSample {
    /// Truncated to the minute.
    pub timestamp: DateTime<Local>,
    pub level: MoodLevel,
}

/// One point of the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub time: String,
    pub level: u8,
}

/// Append-only history of mood samples.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MoodLedger {
    samples: Vec<MoodSample>,
}

impl MoodLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, level: MoodLevel) -> &MoodSample {
        self.record_at(level, Local::now())
    }

    /// Record a sample taken at `at`. Samples stay ordered by timestamp even
    /// when they arrive late.
    pub fn record_at(&mut self, level: MoodLevel, at: DateTime<Local>) -> &MoodSample {
        let timestamp = at
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(at);
        let pos = self.samples.partition_point(|s| s.timestamp <= timestamp);
        self.samples.insert(pos, MoodSample { timestamp, level });
        &self.samples[pos]
    }

    pub fn samples(&self) -> &[MoodSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&MoodSample> {
        self.samples.last()
    }

    pub fn average(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: u32 = self.samples.iter().map(|s| s.level.value() as u32).sum();
        Some(sum as f64 / self.samples.len() as f64)
    }

    /// Chart series: `HH:MM` labels against levels, in recording order.
    pub fn trend(&self) -> Vec<TrendPoint> {
        self.samples
            .iter()
            .map(|s| TrendPoint {
                time: s.timestamp.format("%H:%M").to_string(),
                level: s.level.value(),
            })
            .collect()
    }
}
