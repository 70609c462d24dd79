//! Emoji reaction model.
//!
//! At most one reaction per (user, book); re-reacting replaces the type in place.

use serde::{Deserialize, Serialize};

/// A single emoji-typed endorsement of a book by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub reaction_type: String,
}

/// Request body for adding or replacing the caller's reaction on a book.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertReactionRequest {
    pub book_id: String,
    pub reaction_type: String,
}
