use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ids::UserId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub streak_count: u32,
    pub last_check_in_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            email: email.into(),
            username: username.into(),
            streak_count: 0,
            last_check_in_date: None,
            created_at: Utc::now(),
        }
    }

    /// Streak as it should be shown on `today`. A streak whose last check-in is
    /// older than yesterday is already broken, even though the stored counter
    /// only resets on the next check-in.
    pub fn streak_as_of(&self, today: NaiveDate) -> u32 {
        match self.last_check_in_date {
            Some(last) if (today - last).num_days() <= 1 => self.streak_count,
            _ => 0,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,
}

/// GET /api/me
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub streak_count: u32,
    pub current_streak: u32,
    pub last_check_in_date: Option<NaiveDate>,
    pub habits_count: usize,
    pub completed_today: usize,
    pub postcards_count: usize,
    pub created_at: DateTime<Utc>,
}
