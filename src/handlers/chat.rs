use axum::{extract::State, Extension, Json};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::chat::{ChatExchange, ChatHistory, SendMessageRequest};
use crate::services::chat::SUGGESTIONS;
use crate::AppState;

pub async fn get_chat(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<ChatHistory>> {
    let session = state.session.read().await;
    let profile = session.profile_of(auth_user.id)?;

    let suggestions = if profile.chat_started() {
        Vec::new()
    } else {
        SUGGESTIONS.to_vec()
    };

    Ok(Json(ChatHistory {
        messages: profile.chat.clone(),
        suggestions,
    }))
}

pub async fn send_message(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<SendMessageRequest>,
) -> AppResult<Json<ChatExchange>> {
    body.validate()?;

    let mut session = state.session.write().await;
    let exchange = session
        .profile_of_mut(auth_user.id)?
        .send_chat(&body.content, state.responder.as_ref())?;
    tracing::debug!(user_id = %auth_user.id, "Chat message answered");

    Ok(Json(exchange))
}
