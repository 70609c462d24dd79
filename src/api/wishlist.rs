//! Wishlist API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::{
    AddWishlistRequest, Availability, UpdateWishlistAvailabilityRequest,
    UpdateWishlistStatusRequest, WishlistEntry, WishlistItem, WishlistStatus,
};
use crate::AppState;

/// GET /api/wishlist - List the caller's wishlist with book display fields.
pub async fn list_wishlist(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Vec<WishlistItem>> {
    match state.repo.list_wishlist(&identity.user_id).await {
        Ok(items) => success(items),
        Err(e) => error(e),
    }
}

/// POST /api/wishlist - Add a book to the caller's wishlist.
///
/// Re-adding a book already on the list returns the existing entry rather
/// than an error.
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<AddWishlistRequest>,
) -> ApiResult<WishlistEntry> {
    if request.book_id.trim().is_empty() {
        return error(AppError::Validation("Missing bookId".to_string()));
    }

    match state
        .repo
        .add_to_wishlist(&identity.user_id, &request.book_id)
        .await
    {
        Ok(entry) => success(entry),
        Err(e) => error(e),
    }
}

/// PUT /api/wishlist/:id/status - Change the reading status of an entry.
pub async fn update_wishlist_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
    Json(request): Json<UpdateWishlistStatusRequest>,
) -> ApiResult<WishlistEntry> {
    let Some(status) = WishlistStatus::from_str(&request.status) else {
        return error(AppError::Validation(format!(
            "Invalid status '{}': expected one of 'for later', 'in progress', 'finished'",
            request.status
        )));
    };

    match state
        .repo
        .update_wishlist_status(&id, &identity.user_id, status)
        .await
    {
        Ok(entry) => success(entry),
        Err(e) => error(e),
    }
}

/// PUT /api/wishlist/:id/availability - Change an entry's availability (admin).
pub async fn update_wishlist_availability(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
    Json(request): Json<UpdateWishlistAvailabilityRequest>,
) -> ApiResult<WishlistEntry> {
    if let Err(e) = identity.require_admin() {
        return error(e);
    }

    let Some(availability) = Availability::from_str(&request.availability) else {
        return error(AppError::Validation(format!(
            "Invalid availability '{}': expected 'available' or 'out of stock'",
            request.availability
        )));
    };

    match state
        .repo
        .update_wishlist_availability(&id, availability)
        .await
    {
        Ok(entry) => success(entry),
        Err(e) => error(e),
    }
}

/// DELETE /api/wishlist/:book_id - Remove a book from the caller's wishlist.
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    identity: Identity,
    Path(book_id): Path<String>,
) -> ApiResult<()> {
    match state
        .repo
        .remove_from_wishlist(&identity.user_id, &book_id)
        .await
    {
        Ok(()) => success(()),
        Err(e) => error(e),
    }
}
