pub mod chat;
pub mod habit;
pub mod ids;
pub mod mood;
pub mod pet;
pub mod postcard;
pub mod story;
pub mod user;
