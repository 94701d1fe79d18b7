use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::ids::PostcardId;
use crate::models::pet::PetResponse;
use crate::models::postcard::Postcard;
use crate::services::unlock::next_requirement;
use crate::AppState;

pub async fn get_pet(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<PetResponse>> {
    let session = state.session.read().await;
    let pet = &session.profile_of(auth_user.id)?.pet;

    Ok(Json(PetResponse {
        pet: pet.clone(),
        species_glyph: pet.species.glyph(),
        planet_glyph: pet.current_planet.glyph(),
        next_planet: pet.current_planet.next(),
        next_unlock_at: next_requirement(pet, &state.catalog),
    }))
}

/// Postcard inbox, most recently delivered first.
pub async fn list_postcards(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Postcard>>> {
    let session = state.session.read().await;
    let postcards = session
        .profile_of(auth_user.id)?
        .pet
        .unlocked_postcards
        .iter()
        .rev()
        .cloned()
        .collect();
    Ok(Json(postcards))
}

pub async fn get_postcard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(postcard_id): Path<PostcardId>,
) -> AppResult<Json<Postcard>> {
    let session = state.session.read().await;
    let postcard = session
        .profile_of(auth_user.id)?
        .pet
        .postcard(postcard_id)
        .ok_or(AppError::NotFound("Postcard not found".into()))?;
    Ok(Json(postcard.clone()))
}
