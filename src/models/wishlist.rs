//! Wishlist entry model.

use serde::{Deserialize, Serialize};

/// Reading progress status of a wishlist entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WishlistStatus {
    #[serde(rename = "for later")]
    ForLater,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "finished")]
    Finished,
}

impl WishlistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WishlistStatus::ForLater => "for later",
            WishlistStatus::InProgress => "in progress",
            WishlistStatus::Finished => "finished",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "for later" => Some(WishlistStatus::ForLater),
            "in progress" => Some(WishlistStatus::InProgress),
            "finished" => Some(WishlistStatus::Finished),
            _ => None,
        }
    }
}

/// Stock availability of the wished-for book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Availability {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "out of stock")]
    OutOfStock,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::OutOfStock => "out of stock",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Availability::Available),
            "out of stock" => Some(Availability::OutOfStock),
            _ => None,
        }
    }
}

/// A user's tracked interest in a catalog book.
///
/// `date_added` is set at creation and never changes; status and availability
/// are the only mutable fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub status: WishlistStatus,
    pub availability: Availability,
    pub date_added: String,
}

/// Wishlist entry joined with the book's display fields for listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub book_id: String,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub status: WishlistStatus,
    pub availability: Availability,
    pub date_added: String,
}

/// Request body for adding a book to the caller's wishlist.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWishlistRequest {
    pub book_id: String,
}

/// Request body for changing an entry's reading status.
///
/// The status arrives as a plain string so out-of-range values surface as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWishlistStatusRequest {
    pub status: String,
}

/// Request body for changing an entry's availability flag (admin only).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWishlistAvailabilityRequest {
    pub availability: String,
}
