use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::ids::{HabitId, UserId};

/// Icon keys offered by the habit editor.
pub const HABIT_ICONS: [&str; 11] = [
    "book.fill",
    "fork.knife",
    "pencil",
    "heart.fill",
    "star.fill",
    "moon.fill",
    "sun.max.fill",
    "cloud.fill",
    "bolt.fill",
    "leaf.fill",
    "flame.fill",
];

pub const DEFAULT_HABIT_ICON: &str = "star.fill";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub icon: String,
    /// Whether `completion_dates` holds the day this value was read for. See
    /// `as_of`.
    pub is_completed: bool,
    /// Ascending, one entry per calendar day.
    pub completion_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(
        user_id: UserId,
        title: &str,
        description: Option<&str>,
        icon: Option<&str>,
    ) -> AppResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Habit title is required".into()));
        }

        let icon = icon.unwrap_or(DEFAULT_HABIT_ICON);
        if !HABIT_ICONS.contains(&icon) {
            return Err(AppError::Validation(format!("Unknown habit icon: {}", icon)));
        }

        Ok(Self {
            id: HabitId::new(),
            user_id,
            title: title.to_string(),
            description: description.map(str::trim).unwrap_or_default().to_string(),
            icon: icon.to_string(),
            is_completed: false,
            completion_dates: Vec::new(),
            created_at: Utc::now(),
        })
    }

    pub fn is_completed_on(&self, date: NaiveDate) -> bool {
        self.completion_dates.binary_search(&date).is_ok()
    }

    /// A copy whose `is_completed` reflects `today`.
    pub fn as_of(&self, today: NaiveDate) -> Habit {
        Habit {
            is_completed: self.is_completed_on(today),
            ..self.clone()
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be under 2000 characters"))]
    pub description: Option<String>,

    /// One of `HABIT_ICONS`. Default: "star.fill"
    pub icon: Option<String>,
}

/// POST /api/habits/:id/checkin
#[derive(Debug, Default, Deserialize)]
pub struct CheckInRequest {
    /// Day being checked in. Default: today.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HabitWithStatus {
    #[serde(flatten)]
    pub habit: Habit,
    pub completed_today: bool,
    pub current_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitStreak {
    pub habit_id: HabitId,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: usize,
    pub completed_today: bool,
}
