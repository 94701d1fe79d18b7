pub mod authenticator;
pub mod middleware;
