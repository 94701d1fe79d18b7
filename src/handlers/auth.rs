use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::authenticator::Identity;
use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::user::{UpdateProfileRequest, UserProfile};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 254, message = "Email too long"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct SignOutResponse {
    pub signed_out: bool,
}

async fn start_session(state: &AppState, identity: Identity) -> AppResult<UserProfile> {
    let mut session = state.session.write().await;
    let previous = std::mem::take(&mut *session);
    *session = previous.sign_in(identity, &state.config.pet_name, state.config.pet_species);

    let profile = session.profile()?;
    tracing::info!(user_id = %profile.user.id, pet_id = %profile.pet.id, "Session started");
    Ok(profile.summary(Utc::now().date_naive()))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<SignInRequest>,
) -> AppResult<Json<UserProfile>> {
    body.validate()?;
    let identity = state.authenticator.sign_in(&body.email, &body.password)?;
    Ok(Json(start_session(&state, identity).await?))
}

pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpRequest>,
) -> AppResult<Json<UserProfile>> {
    body.validate()?;
    let identity = state
        .authenticator
        .sign_up(&body.email, &body.password, body.username.trim())?;
    Ok(Json(start_session(&state, identity).await?))
}

pub async fn sign_out(State(state): State<AppState>) -> AppResult<Json<SignOutResponse>> {
    let mut session = state.session.write().await;
    let previous = std::mem::take(&mut *session);
    *session = previous.sign_out();
    Ok(Json(SignOutResponse { signed_out: true }))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserProfile>> {
    let session = state.session.read().await;
    let profile = session.profile_of(auth_user.id)?;
    Ok(Json(profile.summary(Utc::now().date_naive())))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserProfile>> {
    body.validate()?;

    let mut session = state.session.write().await;
    let profile = session.profile_of_mut(auth_user.id)?;
    profile.rename(&body.username)?;
    tracing::info!(user_id = %auth_user.id, "Username updated");

    Ok(Json(profile.summary(Utc::now().date_naive())))
}
