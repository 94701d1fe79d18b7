pub mod chat;
pub mod community;
pub mod session;
pub mod streak;
pub mod unlock;
