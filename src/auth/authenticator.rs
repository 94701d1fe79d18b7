use crate::error::AppResult;

/// Who a set of credentials belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub email: String,
    pub username: String,
}

/// Resolves credentials into an identity, or rejects them with
/// `AppError::AuthFailure`.
pub trait Authenticator: Send + Sync {
    fn sign_in(&self, email: &str, credential: &str) -> AppResult<Identity>;

    fn sign_up(&self, email: &str, credential: &str, username: &str) -> AppResult<Identity>;
}

/// Accepts every credential. There is no account store behind it, so a
/// sign-in identifies the user by email alone.
#[derive(Debug, Default, Clone)]
pub struct SimulatedAuthenticator;

impl Authenticator for SimulatedAuthenticator {
    fn sign_in(&self, email: &str, _credential: &str) -> AppResult<Identity> {
        tracing::debug!(email = %email, "Simulated sign-in accepted");
        Ok(Identity {
            email: email.to_string(),
            username: email.to_string(),
        })
    }

    fn sign_up(&self, email: &str, _credential: &str, username: &str) -> AppResult<Identity> {
        tracing::debug!(email = %email, username = %username, "Simulated sign-up accepted");
        Ok(Identity {
            email: email.to_string(),
            username: username.to_string(),
        })
    }
}
