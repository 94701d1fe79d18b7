use chrono::{Duration, Utc};

use crate::error::{AppError, AppResult};
use crate::models::ids::StoryId;
use crate::models::story::{Story, StoryTag};

pub const DEFAULT_AVATAR: &str = "frog_icon";

/// In-memory story feed, newest first.
#[derive(Debug, Clone, Default)]
pub struct CommunityFeed {
    stories: Vec<Story>,
}

impl CommunityFeed {
    pub fn seeded() -> Self {
        let now = Utc::now();
        let seed = [
            (
                "Frodo_Lover",
                "Today I finally found the courage to talk to my parents about my feelings.",
                "frog_icon",
                vec![StoryTag::Growth],
            ),
            (
                "TinySunshine",
                "Yesterday I got up early and made my favorite breakfast.",
                "sun_icon",
                vec![StoryTag::Growth, StoryTag::Emo],
            ),
            (
                "Crying_Mouse",
                "I think I secretly miss someone again.",
                "mouse_icon",
                vec![StoryTag::Friendship],
            ),
        ];

        let stories = seed
            .into_iter()
            .enumerate()
            .map(|(i, (username, content, avatar, tags))| Story {
                id: StoryId::new(),
                username: username.to_string(),
                avatar: avatar.to_string(),
                content: content.to_string(),
                tags,
                likes: 0,
                comments: 0,
                liked: false,
                created_at: now - Duration::hours(i as i64 + 1),
            })
            .collect();

        Self { stories }
    }

    pub fn list(&self, tag: Option<StoryTag>) -> Vec<Story> {
        self.stories
            .iter()
            .filter(|s| tag.map_or(true, |t| s.tags.contains(&t)))
            .cloned()
            .collect()
    }

    pub fn post(&mut self, username: &str, content: &str, tags: Vec<StoryTag>) -> AppResult<&Story> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Story content is required".into()));
        }

        let mut tags = tags;
        tags.sort();
        tags.dedup();

        self.stories.insert(
            0,
            Story {
                id: StoryId::new(),
                username: username.to_string(),
                avatar: DEFAULT_AVATAR.to_string(),
                content: content.to_string(),
                tags,
                likes: 0,
                comments: 0,
                liked: false,
                created_at: Utc::now(),
            },
        );
        Ok(&self.stories[0])
    }

    pub fn toggle_like(&mut self, id: StoryId) -> AppResult<&Story> {
        let story = self
            .stories
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AppError::NotFound("Story not found".into()))?;

        if story.liked {
            story.likes = story.likes.saturating_sub(1);
        } else {
            story.likes += 1;
        }
        story.liked = !story.liked;
        Ok(&*story)
    }
}
