//! Fixed display tokens the pages render: emoji, colour classes and labels.

use crate::models::{JournalMood, Mood};
use serde::Serialize;

pub const UNKNOWN_MOOD_EMOJI: &str = "🤔";
pub const UNKNOWN_MOOD_COLOR: &str = "bg-gray-200";

pub fn mood_emoji(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "😊",
        Mood::Sad => "😢",
        Mood::Angry => "😡",
        Mood::Neutral => "😐",
        Mood::Calm => "😌",
    }
}

pub fn mood_color(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "bg-mood-happy",
        Mood::Sad => "bg-mood-sad",
        Mood::Angry => "bg-mood-angry",
        Mood::Neutral => "bg-mood-neutral",
        Mood::Calm => "bg-mood-calm",
    }
}

pub fn journal_mood_emoji(mood: JournalMood) -> &'static str {
    match mood {
        JournalMood::Happy => mood_emoji(Mood::Happy),
        JournalMood::Sad => mood_emoji(Mood::Sad),
        JournalMood::Angry => mood_emoji(Mood::Angry),
        JournalMood::Neutral => mood_emoji(Mood::Neutral),
        JournalMood::Calm => mood_emoji(Mood::Calm),
        JournalMood::Anxious => "😰",
    }
}

/// Anxious has no tracker colour of its own and renders in the neutral grey.
pub fn journal_mood_color(mood: JournalMood) -> &'static str {
    match mood {
        JournalMood::Happy => mood_color(Mood::Happy),
        JournalMood::Sad => mood_color(Mood::Sad),
        JournalMood::Angry => mood_color(Mood::Angry),
        JournalMood::Neutral => mood_color(Mood::Neutral),
        JournalMood::Calm => mood_color(Mood::Calm),
        JournalMood::Anxious => UNKNOWN_MOOD_COLOR,
    }
}

/// Lookup by raw label for callers holding untyped text; unknown labels get
/// [`UNKNOWN_MOOD_EMOJI`].
pub fn mood_emoji_for_label(label: &str) -> &'static str {
    parse_journal_mood(label).map_or(UNKNOWN_MOOD_EMOJI, journal_mood_emoji)
}

pub fn mood_color_for_label(label: &str) -> &'static str {
    parse_journal_mood(label).map_or(UNKNOWN_MOOD_COLOR, journal_mood_color)
}

fn parse_journal_mood(label: &str) -> Option<JournalMood> {
    label.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepBand {
    Red,
    Yellow,
    Green,
    Blue,
}

impl SleepBand {
    pub fn classes(self) -> &'static str {
        match self {
            SleepBand::Red => "bg-red-200 text-red-800",
            SleepBand::Yellow => "bg-yellow-200 text-yellow-800",
            SleepBand::Green => "bg-green-200 text-green-800",
            SleepBand::Blue => "bg-blue-200 text-blue-800",
        }
    }
}

/// Half-open buckets: `[0, 6)` red, `[6, 7)` yellow, `[7, 9)` green, `9+` blue.
pub fn sleep_color(hours: f64) -> SleepBand {
    if hours < 6.0 {
        SleepBand::Red
    } else if hours < 7.0 {
        SleepBand::Yellow
    } else if hours < 9.0 {
        SleepBand::Green
    } else {
        SleepBand::Blue
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}
