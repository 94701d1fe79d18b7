use rand::seq::SliceRandom;

use crate::models::pet::Pet;

pub const SUGGESTIONS: [&str; 5] = [
    "How are you today?",
    "Tell me about your journey",
    "What's your favorite planet?",
    "Can you share a story?",
    "Give me some motivation",
];

const FALLBACK_REPLIES: [&str; 5] = [
    "That's interesting! Tell me more about it.",
    "I love chatting with you! It makes my space journey even more special.",
    "You know, that reminds me of a beautiful constellation I saw recently...",
    "Your thoughts are as vast as the universe itself!",
    "Let's keep exploring and growing together!",
];

/// Produces the pet's side of a conversation.
pub trait ResponseStrategy: Send + Sync {
    fn respond(&self, pet: &Pet, input: &str) -> String;
}

pub fn greeting(pet: &Pet) -> String {
    format!("Hi! I'm {}. What would you like to talk about?", pet.name)
}

/// Canned replies picked by keyword, with a random fallback.
#[derive(Debug, Default, Clone)]
pub struct KeywordResponder;

impl ResponseStrategy for KeywordResponder {
    fn respond(&self, pet: &Pet, input: &str) -> String {
        let lowercased = input.to_lowercase();
        let planet = pet.current_planet;

        if lowercased.contains("how are you") {
            format!(
                "I'm doing great! Just got back from exploring {} {}. The view was amazing!",
                planet.name(),
                planet.glyph()
            )
        } else if lowercased.contains("journey") || lowercased.contains("travel") {
            format!(
                "I love traveling through space! Each planet has its own unique beauty. Right now, I'm fascinated by {}.",
                planet.name()
            )
        } else if lowercased.contains("planet") {
            match planet.next() {
                Some(next) => format!(
                    "{} is lovely, but I'm really excited about visiting {} next. Keep your streak going and I'll send you a postcard! ✨",
                    planet.name(),
                    next.name()
                ),
                None => format!(
                    "{} is my favorite. Those rings are spectacular! ✨",
                    planet.name()
                ),
            }
        } else if lowercased.contains("story") {
            "Once, while visiting the moon, I made friends with a star. We spent hours talking about dreams and cosmic adventures. 🌟".to_string()
        } else if lowercased.contains("motivation") || lowercased.contains("inspire") {
            "Remember: Every small step you take is progress. Just like how I explore space one planet at a time, you can achieve your goals one step at a time! 💫".to_string()
        } else {
            FALLBACK_REPLIES
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or("That's fascinating!")
                .to_string()
        }
    }
}
