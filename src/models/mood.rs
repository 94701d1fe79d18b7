use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ids::{MoodId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodEmoji {
    Happy,
    Sad,
    Angry,
    Anxious,
    Calm,
    Excited,
    Tired,
    Neutral,
}

impl MoodEmoji {
    pub fn glyph(self) -> &'static str {
        match self {
            MoodEmoji::Happy => "😊",
            MoodEmoji::Sad => "😢",
            MoodEmoji::Angry => "😠",
            MoodEmoji::Anxious => "😰",
            MoodEmoji::Calm => "😌",
            MoodEmoji::Excited => "🤩",
            MoodEmoji::Tired => "😴",
            MoodEmoji::Neutral => "😐",
        }
    }
}

/// A logged mood. Never edited once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    pub id: MoodId,
    pub user_id: UserId,
    pub emoji: MoodEmoji,
    pub note: String,
    pub date: DateTime<Utc>,
}

impl Mood {
    pub fn new(user_id: UserId, emoji: MoodEmoji, note: Option<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: MoodId::new(),
            user_id,
            emoji,
            note: note.unwrap_or_default(),
            date,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogMoodRequest {
    pub emoji: MoodEmoji,

    #[validate(length(max = 5000, message = "Note must be under 5000 characters"))]
    pub note: Option<String>,

    /// Default: now
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct MoodResponse {
    #[serde(flatten)]
    pub mood: Mood,
    pub glyph: &'static str,
}

impl From<Mood> for MoodResponse {
    fn from(mood: Mood) -> Self {
        let glyph = mood.emoji.glyph();
        Self { mood, glyph }
    }
}
