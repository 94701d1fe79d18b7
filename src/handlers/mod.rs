pub mod auth;
pub mod chat;
pub mod community;
pub mod habits;
pub mod health;
pub mod moods;
pub mod pet;
