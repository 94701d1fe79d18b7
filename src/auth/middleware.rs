use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::models::ids::UserId;
use crate::AppState;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
}

/// Rejects requests while no one is signed in, otherwise exposes the current
/// user to handlers as an `AuthUser` extension.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_user = {
        let session = state.session.read().await;
        AuthUser {
            id: session.profile()?.user.id,
        }
    };

    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}
