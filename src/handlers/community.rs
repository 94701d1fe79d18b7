use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::ids::StoryId;
use crate::models::story::{CreateStoryRequest, Story, StoryQuery};
use crate::AppState;

pub async fn list_stories(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<StoryQuery>,
) -> AppResult<Json<Vec<Story>>> {
    let feed = state.community.read().await;
    Ok(Json(feed.list(query.tag)))
}

pub async fn create_story(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateStoryRequest>,
) -> AppResult<Json<Story>> {
    body.validate()?;

    let username = {
        let session = state.session.read().await;
        session.profile_of(auth_user.id)?.user.username.clone()
    };

    let mut feed = state.community.write().await;
    let story = feed.post(&username, &body.content, body.tags)?;
    tracing::info!(user_id = %auth_user.id, story_id = %story.id, "Story posted");

    Ok(Json(story.clone()))
}

pub async fn like_story(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(story_id): Path<StoryId>,
) -> AppResult<Json<Story>> {
    let mut feed = state.community.write().await;
    let story = feed.toggle_like(story_id)?;
    Ok(Json(story.clone()))
}
