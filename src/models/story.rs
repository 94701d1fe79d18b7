use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ids::StoryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryTag {
    Growth,
    Emo,
    Friendship,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    pub username: String,
    pub avatar: String,
    pub content: String,
    pub tags: Vec<StoryTag>,
    pub likes: u32,
    pub comments: u32,
    /// Whether the signed-in reader has liked this story.
    pub liked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStoryRequest {
    #[validate(length(min = 1, max = 2000, message = "Story must be 1-2000 characters"))]
    pub content: String,

    #[serde(default)]
    pub tags: Vec<StoryTag>,
}

#[derive(Debug, Deserialize)]
pub struct StoryQuery {
    pub tag: Option<StoryTag>,
}
