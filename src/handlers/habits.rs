use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::habit::{CheckInRequest, CreateHabitRequest, Habit, HabitStreak, HabitWithStatus};
use crate::models::ids::HabitId;
use crate::services::session::CheckInReport;
use crate::services::streak::habit_streak;
use crate::AppState;

pub async fn list_habits(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<HabitWithStatus>>> {
    let today = Utc::now().date_naive();
    let session = state.session.read().await;
    let profile = session.profile_of(auth_user.id)?;

    let result = profile
        .habits
        .iter()
        .map(|habit| {
            let streak = habit_streak(habit, today);
            HabitWithStatus {
                habit: habit.as_of(today),
                completed_today: streak.completed_today,
                current_streak: streak.current_streak,
            }
        })
        .collect();

    Ok(Json(result))
}

pub async fn get_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(habit_id): Path<HabitId>,
) -> AppResult<Json<Habit>> {
    let session = state.session.read().await;
    let habit = session.profile_of(auth_user.id)?.habit(habit_id)?;
    Ok(Json(habit.as_of(Utc::now().date_naive())))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateHabitRequest>,
) -> AppResult<Json<Habit>> {
    body.validate()?;

    let mut session = state.session.write().await;
    let habit = session.profile_of_mut(auth_user.id)?.create_habit(
        &body.title,
        body.description.as_deref(),
        body.icon.as_deref(),
    )?;

    Ok(Json(habit.clone()))
}

pub async fn check_in(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(habit_id): Path<HabitId>,
    body: Result<Json<CheckInRequest>, JsonRejection>,
) -> AppResult<Json<CheckInReport>> {
    // No JSON body at all means "today"; a body that fails to parse is an error.
    let body = match body {
        Ok(Json(body)) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => CheckInRequest::default(),
        Err(rejection) => return Err(AppError::Validation(rejection.body_text())),
    };

    let today = Utc::now().date_naive();
    let date = body.date.unwrap_or(today);

    let mut session = state.session.write().await;
    let report = session
        .profile_of_mut(auth_user.id)?
        .check_in(habit_id, date, today, &state.catalog)
        .map_err(|e| {
            tracing::debug!(user_id = %auth_user.id, habit_id = %habit_id, error = %e, "Check-in rejected");
            e
        })?;

    Ok(Json(report))
}

pub async fn get_streak(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(habit_id): Path<HabitId>,
) -> AppResult<Json<HabitStreak>> {
    let session = state.session.read().await;
    let habit = session.profile_of(auth_user.id)?.habit(habit_id)?;
    Ok(Json(habit_streak(habit, Utc::now().date_naive())))
}
