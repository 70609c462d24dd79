//! Cart API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::{AddCartItemRequest, CartItem, CartSummary, UpdateCartItemRequest};
use crate::AppState;

/// GET /api/cart - The caller's cart with running totals.
pub async fn get_cart(State(state): State<AppState>, identity: Identity) -> ApiResult<CartSummary> {
    match state.repo.get_cart(&identity.user_id).await {
        Ok(summary) => success(summary),
        Err(e) => error(e),
    }
}

/// POST /api/cart - Add a book to the cart, merging with an existing line item.
pub async fn add_cart_item(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<AddCartItemRequest>,
) -> ApiResult<CartItem> {
    if request.book_id.trim().is_empty() {
        return error(AppError::Validation("Missing bookId".to_string()));
    }
    if request.quantity < 1 {
        return error(AppError::Validation(
            "Quantity must be a positive integer".to_string(),
        ));
    }
    if request.price < 0.0 {
        return error(AppError::Validation(
            "Price must be non-negative".to_string(),
        ));
    }

    match state.repo.add_cart_item(&identity.user_id, &request).await {
        Ok(item) => success(item),
        Err(e) => error(e),
    }
}

/// PUT /api/cart/:id - Set a cart item's quantity.
pub async fn update_cart_item(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
    Json(request): Json<UpdateCartItemRequest>,
) -> ApiResult<CartItem> {
    if request.quantity <= 0 {
        return error(AppError::Validation(
            "Quantity must be greater than zero".to_string(),
        ));
    }

    match state
        .repo
        .set_cart_quantity(&id, &identity.user_id, request.quantity)
        .await
    {
        Ok(item) => success(item),
        Err(e) => error(e),
    }
}

/// DELETE /api/cart/:id - Remove one item from the cart.
pub async fn remove_cart_item(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> ApiResult<()> {
    match state.repo.remove_cart_item(&id, &identity.user_id).await {
        Ok(()) => success(()),
        Err(e) => error(e),
    }
}

/// DELETE /api/cart - Clear the caller's cart.
pub async fn clear_cart(State(state): State<AppState>, identity: Identity) -> ApiResult<()> {
    match state.repo.clear_cart(&identity.user_id).await {
        Ok(()) => success(()),
        Err(e) => error(e),
    }
}
