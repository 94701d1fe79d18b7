use axum::{extract::State, Extension, Json};
use chrono::Utc;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::mood::{LogMoodRequest, MoodResponse};
use crate::AppState;

pub async fn log_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<LogMoodRequest>,
) -> AppResult<Json<MoodResponse>> {
    body.validate()?;

    let mut session = state.session.write().await;
    let mood = session.profile_of_mut(auth_user.id)?.log_mood(
        body.emoji,
        body.note,
        body.date.unwrap_or_else(Utc::now),
    );
    tracing::info!(user_id = %auth_user.id, mood = ?mood.emoji, "Mood logged");

    Ok(Json(mood.clone().into()))
}

pub async fn list_moods(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<MoodResponse>>> {
    let session = state.session.read().await;
    let mut moods = session.profile_of(auth_user.id)?.moods.clone();
    moods.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(Json(moods.into_iter().map(MoodResponse::from).collect()))
}
