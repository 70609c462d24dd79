//! Cart item model.
//!
//! Cart rows reference books by id; the title shown to clients is joined in
//! at read time so renames and duplicate titles cannot corrupt the ledger.

use serde::{Deserialize, Serialize};

/// A quantity of one catalog book a user intends to purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub price: f64,
    pub quantity: i64,
}

/// Cart item joined with the book title for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub id: String,
    pub book_id: String,
    pub title: String,
    pub price: f64,
    pub quantity: i64,
}

/// The caller's cart with running totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartItemView>,
    pub total_items: i64,
    pub total_price: f64,
}

/// Request body for adding a book to the cart.
///
/// Adding a book already in the caller's cart increments its quantity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub book_id: String,
    pub price: f64,
    pub quantity: i64,
}

/// Request body for setting a cart item's quantity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub quantity: i64,
}
