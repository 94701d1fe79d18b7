use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ids::MessageId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    pub is_from_pet: bool,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn from_user(content: impl Into<String>) -> Self {
        Self::new(content.into(), false)
    }

    pub fn from_pet(content: impl Into<String>) -> Self {
        Self::new(content.into(), true)
    }

    fn new(content: String, is_from_pet: bool) -> Self {
        Self {
            id: MessageId::new(),
            content,
            is_from_pet,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters"))]
    pub content: String,
}

/// GET /api/chat
#[derive(Debug, Serialize)]
pub struct ChatHistory {
    pub messages: Vec<ChatMessage>,
    /// Prompt chips, offered until the first message is sent.
    pub suggestions: Vec<&'static str>,
}

/// POST /api/chat
#[derive(Debug, Serialize)]
pub struct ChatExchange {
    pub sent: ChatMessage,
    pub reply: ChatMessage,
}
