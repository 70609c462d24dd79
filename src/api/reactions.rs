//! Emoji reaction API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::{Reaction, UpsertReactionRequest};
use crate::AppState;

/// GET /api/reactions/emojis - The configured emoji allow-list.
pub async fn list_emojis(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    success(state.config.reaction_emojis.clone())
}

/// PUT /api/reactions - Add or replace the caller's reaction on a book.
pub async fn upsert_reaction(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<UpsertReactionRequest>,
) -> ApiResult<Reaction> {
    if request.book_id.trim().is_empty() {
        return error(AppError::Validation("Missing bookId".to_string()));
    }
    if !state.config.is_allowed_reaction(&request.reaction_type) {
        return error(AppError::Validation(format!(
            "Reaction '{}' not supported",
            request.reaction_type
        )));
    }

    match state
        .repo
        .upsert_reaction(&identity.user_id, &request.book_id, &request.reaction_type)
        .await
    {
        Ok(reaction) => success(reaction),
        Err(e) => error(e),
    }
}

/// GET /api/reactions/book/:book_id - All reactions on a book.
pub async fn list_reactions_for_book(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> ApiResult<Vec<Reaction>> {
    match state.repo.list_reactions_for_book(&book_id).await {
        Ok(reactions) => success(reactions),
        Err(e) => error(e),
    }
}

/// GET /api/reactions/mine - All reactions left by the caller.
pub async fn list_my_reactions(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Vec<Reaction>> {
    match state.repo.list_reactions_for_user(&identity.user_id).await {
        Ok(reactions) => success(reactions),
        Err(e) => error(e),
    }
}

/// DELETE /api/reactions/:book_id - Remove the caller's reaction on a book.
pub async fn delete_reaction(
    State(state): State<AppState>,
    identity: Identity,
    Path(book_id): Path<String>,
) -> ApiResult<()> {
    match state
        .repo
        .delete_reaction(&identity.user_id, &book_id)
        .await
    {
        Ok(()) => success(()),
        Err(e) => error(e),
    }
}

/// DELETE /api/reactions - Reset every reaction left by the caller.
pub async fn reset_reactions(State(state): State<AppState>, identity: Identity) -> ApiResult<()> {
    match state.repo.reset_reactions_for_user(&identity.user_id).await {
        Ok(()) => success(()),
        Err(e) => error(e),
    }
}
