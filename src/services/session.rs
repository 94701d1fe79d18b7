//! The signed-in session and the per-user aggregate it owns.
//!
//! `Session` is a plain value. Signing in or out consumes the old value and
//! returns the new one; nothing outlives sign-out.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::auth::authenticator::Identity;
use crate::error::{AppError, AppResult};
use crate::models::chat::{ChatExchange, ChatMessage};
use crate::models::habit::Habit;
use crate::models::ids::{HabitId, UserId};
use crate::models::mood::{Mood, MoodEmoji};
use crate::models::pet::{Pet, PetSpecies};
use crate::models::postcard::PostcardCatalog;
use crate::models::user::{User, UserProfile};
use crate::services::chat::{self, ResponseStrategy};
use crate::services::streak::{self, CheckInStatus};
use crate::services::unlock::{self, UnlockOutcome};

#[derive(Debug, Default)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn(Box<Profile>),
}

impl Session {
    /// Starts a session for `identity`, replacing any current one. The user
    /// and their pet are created here.
    pub fn sign_in(self, identity: Identity, pet_name: &str, species: PetSpecies) -> Session {
        if let Session::SignedIn(previous) = &self {
            tracing::info!(user_id = %previous.user.id, "Replacing active session");
        }
        Session::SignedIn(Box::new(Profile::onboard(identity, pet_name, species)))
    }

    pub fn sign_out(self) -> Session {
        if let Session::SignedIn(profile) = &self {
            tracing::info!(user_id = %profile.user.id, "Session ended");
        }
        Session::SignedOut
    }

    pub fn profile(&self) -> AppResult<&Profile> {
        match self {
            Session::SignedIn(profile) => Ok(profile.as_ref()),
            Session::SignedOut => Err(AppError::Unauthorized),
        }
    }

    pub fn profile_mut(&mut self) -> AppResult<&mut Profile> {
        match self {
            Session::SignedIn(profile) => Ok(profile.as_mut()),
            Session::SignedOut => Err(AppError::Unauthorized),
        }
    }

    /// The profile, provided it still belongs to `user_id`. A request admitted
    /// for one user must not reach a session started after it.
    pub fn profile_of(&self, user_id: UserId) -> AppResult<&Profile> {
        let profile = self.profile()?;
        if profile.user.id != user_id {
            return Err(AppError::Unauthorized);
        }
        Ok(profile)
    }

    pub fn profile_of_mut(&mut self, user_id: UserId) -> AppResult<&mut Profile> {
        let profile = self.profile_mut()?;
        if profile.user.id != user_id {
            return Err(AppError::Unauthorized);
        }
        Ok(profile)
    }
}

/// Everything that belongs to the signed-in user.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub pet: Pet,
    pub habits: Vec<Habit>,
    pub moods: Vec<Mood>,
    pub chat: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct CheckInReport {
    pub status: CheckInStatus,
    pub habit: Habit,
    pub streak_count: u32,
    pub unlocks: UnlockOutcome,
}

impl Profile {
    fn onboard(identity: Identity, pet_name: &str, species: PetSpecies) -> Self {
        let user = User::new(identity.email, identity.username);
        let pet = Pet::new(user.id, pet_name, species);
        let chat = vec![ChatMessage::from_pet(chat::greeting(&pet))];
        Self {
            user,
            pet,
            habits: Vec::new(),
            moods: Vec::new(),
            chat,
        }
    }

    pub fn habit(&self, id: HabitId) -> AppResult<&Habit> {
        self.habits
            .iter()
            .find(|h| h.id == id)
            .ok_or(AppError::NotFound("Habit not found".into()))
    }

    pub fn create_habit(
        &mut self,
        title: &str,
        description: Option<&str>,
        icon: Option<&str>,
    ) -> AppResult<&Habit> {
        let habit = Habit::new(self.user.id, title, description, icon)?;
        tracing::info!(user_id = %self.user.id, habit_id = %habit.id, "Habit created");
        self.habits.push(habit);
        Ok(&self.habits[self.habits.len() - 1])
    }

    /// Checks in a habit and delivers any postcards the new streak earns.
    /// Both rules run against copies; the profile is only updated when the
    /// check-in succeeds.
    pub fn check_in(
        &mut self,
        habit_id: HabitId,
        date: NaiveDate,
        today: NaiveDate,
        catalog: &PostcardCatalog,
    ) -> AppResult<CheckInReport> {
        let index = self
            .habits
            .iter()
            .position(|h| h.id == habit_id)
            .ok_or(AppError::NotFound("Habit not found".into()))?;

        let outcome = streak::check_in(&self.user, &self.habits[index], date, today)?;
        let unlocks = unlock::apply_unlocks(&self.pet, outcome.user.streak_count, catalog);

        if outcome.status == CheckInStatus::Recorded {
            tracing::info!(
                user_id = %outcome.user.id,
                habit_id = %habit_id,
                date = %date,
                streak = outcome.user.streak_count,
                "Check-in recorded"
            );
        }
        if unlocks.changed() {
            tracing::info!(
                pet_id = %unlocks.pet.id,
                unlocked = unlocks.newly_unlocked.len(),
                planet = ?unlocks.pet.current_planet,
                "Postcards delivered"
            );
        }

        self.user = outcome.user;
        self.habits[index] = outcome.habit;
        self.pet = unlocks.pet.clone();

        Ok(CheckInReport {
            status: outcome.status,
            habit: self.habits[index].clone(),
            streak_count: self.user.streak_count,
            unlocks,
        })
    }

    pub fn log_mood(
        &mut self,
        emoji: MoodEmoji,
        note: Option<String>,
        date: DateTime<Utc>,
    ) -> &Mood {
        let mood = Mood::new(self.user.id, emoji, note, date);
        self.moods.push(mood);
        &self.moods[self.moods.len() - 1]
    }

    pub fn rename(&mut self, username: &str) -> AppResult<&User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("Username is required".into()));
        }
        self.user.username = username.to_string();
        Ok(&self.user)
    }

    pub fn send_chat(
        &mut self,
        content: &str,
        responder: &dyn ResponseStrategy,
    ) -> AppResult<ChatExchange> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::Validation("Message cannot be empty".into()));
        }

        let sent = ChatMessage::from_user(content);
        let reply = ChatMessage::from_pet(responder.respond(&self.pet, content));
        self.chat.push(sent.clone());
        self.chat.push(reply.clone());

        Ok(ChatExchange { sent, reply })
    }

    /// Suggestions are only offered before the user has said anything.
    pub fn chat_started(&self) -> bool {
        self.chat.iter().any(|m| !m.is_from_pet)
    }

    pub fn summary(&self, today: NaiveDate) -> UserProfile {
        UserProfile {
            id: self.user.id,
            email: self.user.email.clone(),
            username: self.user.username.clone(),
            streak_count: self.user.streak_count,
            current_streak: self.user.streak_as_of(today),
            last_check_in_date: self.user.last_check_in_date,
            habits_count: self.habits.len(),
            completed_today: self.habits.iter().filter(|h| h.is_completed_on(today)).count(),
            postcards_count: self.pet.unlocked_postcards.len(),
            created_at: self.user.created_at,
        }
    }
}
