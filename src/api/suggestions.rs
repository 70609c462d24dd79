//! Suggestion workflow API endpoints.
//!
//! Submissions are open to any caller; resolving a suggestion (accept or
//! reject) requires the admin role forwarded by the gateway.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::{Book, CreateSuggestionRequest, SuggestedBook, UpdateSuggestionRequest};
use crate::AppState;

/// GET /api/suggest - List all pending suggestions.
pub async fn list_suggestions(State(state): State<AppState>) -> ApiResult<Vec<SuggestedBook>> {
    match state.repo.list_suggestions().await {
        Ok(suggestions) => success(suggestions),
        Err(e) => error(e),
    }
}

/// GET /api/suggest/:id - Get a single pending suggestion.
pub async fn get_suggestion(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<SuggestedBook> {
    match state.repo.get_suggestion(&id).await {
        Ok(Some(suggestion)) => success(suggestion),
        Ok(None) => error(AppError::NotFound(format!("Suggestion {} not found", id))),
        Err(e) => error(e),
    }
}

/// POST /api/suggest - Submit a new book suggestion.
pub async fn create_suggestion(
    State(state): State<AppState>,
    Json(request): Json<CreateSuggestionRequest>,
) -> ApiResult<SuggestedBook> {
    // Validate required fields
    if request.title.trim().is_empty() {
        return error(AppError::Validation("Title is required".to_string()));
    }
    if request.author.trim().is_empty() {
        return error(AppError::Validation("Author is required".to_string()));
    }

    match state.repo.create_suggestion(&request).await {
        Ok(suggestion) => success(suggestion),
        Err(e) => error(e),
    }
}

/// PUT /api/suggest/:id - Patch a still-pending suggestion.
pub async fn update_suggestion(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateSuggestionRequest>,
) -> ApiResult<SuggestedBook> {
    if matches!(&request.title, Some(t) if t.trim().is_empty()) {
        return error(AppError::Validation("Title cannot be empty".to_string()));
    }
    if matches!(&request.author, Some(a) if a.trim().is_empty()) {
        return error(AppError::Validation("Author cannot be empty".to_string()));
    }

    match state.repo.update_suggestion(&id, &request).await {
        Ok(suggestion) => success(suggestion),
        Err(e) => error(e),
    }
}

/// POST /api/suggest/:id/accept - Promote a suggestion into the catalog (admin).
pub async fn accept_suggestion(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<Book> {
    if let Err(e) = identity.require_admin() {
        return error(e);
    }

    match state.repo.accept_suggestion(&id).await {
        Ok(book) => success(book),
        Err(e) => error(e),
    }
}

/// POST /api/suggest/:id/reject - Discard a suggestion (admin).
pub async fn reject_suggestion(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<()> {
    if let Err(e) = identity.require_admin() {
        return error(e);
    }

    match state.repo.reject_suggestion(&id).await {
        Ok(()) => success(()),
        Err(e) => error(e),
    }
}
