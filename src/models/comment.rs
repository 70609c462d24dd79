//! Comment model.

use serde::{Deserialize, Serialize};

/// A free-form annotation on a catalog book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub book_id: String,
    pub user_id: String,
    pub text: String,
    pub created_at: String,
}

/// Request body for adding a comment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub book_id: String,
    pub text: String,
}

/// Request body for editing a comment's text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub text: String,
}

/// Optional book filter for comment listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentFilter {
    pub book_id: Option<String>,
}
