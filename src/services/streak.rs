//! Check-in rule and streak arithmetic.
//!
//! Everything here is a pure function of its inputs: callers pass the current
//! values plus "today" and receive new values back, which they commit as one
//! unit.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::habit::{Habit, HabitStreak};
use crate::models::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInStatus {
    Recorded,
    AlreadyCheckedIn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckInOutcome {
    pub user: User,
    pub habit: Habit,
    pub status: CheckInStatus,
}

/// Records `habit` as done on `date` and advances the owner's streak.
///
/// Re-checking a day already in `completion_dates` changes nothing. A day after
/// the last check-in extends the streak, a later day restarts it at 1, and a
/// backfilled day before the last check-in is recorded without touching it.
pub fn check_in(
    user: &User,
    habit: &Habit,
    date: NaiveDate,
    today: NaiveDate,
) -> AppResult<CheckInOutcome> {
    if date > today {
        return Err(AppError::InvalidDate(date));
    }

    let insert_at = match habit.completion_dates.binary_search(&date) {
        Ok(_) => {
            return Ok(CheckInOutcome {
                user: user.clone(),
                habit: habit.clone(),
                status: CheckInStatus::AlreadyCheckedIn,
            })
        }
        Err(pos) => pos,
    };

    let mut user = user.clone();
    let (streak_count, last_check_in_date) = match user.last_check_in_date {
        None => (1, date),
        Some(last) => match (date - last).num_days() {
            gap if gap < 0 => (user.streak_count, last),
            0 => (user.streak_count, last),
            1 => (user.streak_count.saturating_add(1), date),
            _ => (1, date),
        },
    };
    user.streak_count = streak_count;
    user.last_check_in_date = Some(last_check_in_date);

    let mut habit = habit.clone();
    habit.completion_dates.insert(insert_at, date);
    habit.is_completed = habit.is_completed_on(today);

    Ok(CheckInOutcome {
        user,
        habit,
        status: CheckInStatus::Recorded,
    })
}

/// Per-habit streak figures derived from its completion history.
///
/// The current streak counts back from today; if today has no check-in yet the
/// run ending yesterday is still considered alive.
pub fn habit_streak(habit: &Habit, today: NaiveDate) -> HabitStreak {
    let dates = &habit.completion_dates;

    let mut current_streak = 0u32;
    let mut check_date = if habit.is_completed_on(today) {
        today
    } else {
        today - Duration::days(1)
    };

    for date in dates.iter().rev() {
        if *date == check_date {
            current_streak += 1;
            check_date -= Duration::days(1);
        } else if *date < check_date {
            break;
        }
    }

    let mut longest_streak = 0u32;
    let mut streak = 0u32;
    let mut prev_date: Option<NaiveDate> = None;

    for date in dates {
        streak = match prev_date {
            Some(prev) if *date == prev + Duration::days(1) => streak + 1,
            _ => 1,
        };
        longest_streak = longest_streak.max(streak);
        prev_date = Some(*date);
    }

    HabitStreak {
        habit_id: habit.id,
        current_streak,
        longest_streak,
        total_completions: dates.len(),
        completed_today: habit.is_completed_on(today),
    }
}
