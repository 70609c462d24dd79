//! Comment API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::{Comment, CommentFilter, CreateCommentRequest, UpdateCommentRequest};
use crate::AppState;

/// GET /api/comments - List comments, optionally filtered by book.
pub async fn list_comments(
    State(state): State<AppState>,
    Query(filter): Query<CommentFilter>,
) -> ApiResult<Vec<Comment>> {
    match state.repo.list_comments(&filter).await {
        Ok(comments) => success(comments),
        Err(e) => error(e),
    }
}

/// POST /api/comments - Add a comment to a book.
pub async fn create_comment(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<Comment> {
    if request.text.trim().is_empty() {
        return error(AppError::Validation(
            "Comment text cannot be empty".to_string(),
        ));
    }
    if request.book_id.trim().is_empty() {
        return error(AppError::Validation("Missing bookId".to_string()));
    }

    match state.repo.add_comment(&identity.user_id, &request).await {
        Ok(comment) => success(comment),
        Err(e) => error(e),
    }
}

/// PUT /api/comments/:id - Edit the caller's comment.
pub async fn update_comment(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
    Json(request): Json<UpdateCommentRequest>,
) -> ApiResult<Comment> {
    if request.text.trim().is_empty() {
        return error(AppError::Validation(
            "Comment text cannot be empty".to_string(),
        ));
    }

    match state
        .repo
        .update_comment(&id, &identity.user_id, &request.text)
        .await
    {
        Ok(comment) => success(comment),
        Err(e) => error(e),
    }
}

/// DELETE /api/comments/:id - Delete the caller's comment.
pub async fn delete_comment(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<()> {
    match state.repo.delete_comment(&id, &identity.user_id).await {
        Ok(()) => success(()),
        Err(e) => error(e),
    }
}
