//! Database repository for CRUD operations.
//!
//! Uses prepared statements and transactions for data integrity. Multi-write
//! operations (suggestion acceptance, catalog delete with cascade) run inside
//! one transaction so a failure never leaves the store half-updated.

use chrono::Utc;
use rand::seq::SliceRandom;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    AddCartItemRequest, Availability, Book, BookFilter, CartItem, CartItemView, CartSummary,
    Comment, CommentFilter, CreateBookRequest, CreateCommentRequest, CreateSuggestionRequest,
    Reaction, SuggestedBook, UpdateBookRequest, UpdateSuggestionRequest, WishlistEntry,
    WishlistItem, WishlistStatus,
};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fail with NotFound unless the book id exists in the catalog.
    async fn ensure_book_exists(&self, book_id: &str) -> Result<(), AppError> {
        let row = sqlx::query("SELECT 1 FROM books WHERE id = ?")
            .bind(book_id)
            .fetch_optional(&self.pool)
            .await?;

        if row.is_none() {
            return Err(AppError::NotFound(format!("Book {} not found", book_id)));
        }
        Ok(())
    }

    // ==================== BOOK OPERATIONS ====================

    /// List catalog books in insertion order, optionally filtered by genre
    /// and/or author (case-insensitive).
    pub async fn list_books(&self, filter: &BookFilter) -> Result<Vec<Book>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, author, genre, description, cover_image_url, created_at
               FROM books
               WHERE (?1 IS NULL OR LOWER(genre) = LOWER(?1))
                 AND (?2 IS NULL OR LOWER(author) = LOWER(?2))
               ORDER BY created_at, rowid"#,
        )
        .bind(&filter.genre)
        .bind(&filter.author)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(book_from_row).collect())
    }

    /// Get a book by ID.
    pub async fn get_book(&self, id: &str) -> Result<Option<Book>, AppError> {
        let row = sqlx::query(
            "SELECT id, title, author, genre, description, cover_image_url, created_at FROM books WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(book_from_row))
    }

    /// Create a new catalog book.
    pub async fn create_book(&self, request: &CreateBookRequest) -> Result<Book, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO books (id, title, author, genre, description, cover_image_url, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.author)
        .bind(&request.genre)
        .bind(&request.description)
        .bind(&request.cover_image_url)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Book {
            id,
            title: request.title.clone(),
            author: request.author.clone(),
            genre: request.genre.clone(),
            description: request.description.clone(),
            cover_image_url: request.cover_image_url.clone(),
            created_at: now,
        })
    }

    /// Partially update a book; omitted fields are left unchanged.
    pub async fn update_book(
        &self,
        id: &str,
        request: &UpdateBookRequest,
    ) -> Result<Book, AppError> {
        let existing = self
            .get_book(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        let title = request.title.as_ref().unwrap_or(&existing.title);
        let author = request.author.as_ref().unwrap_or(&existing.author);
        let genre = request.genre.clone().or(existing.genre.clone());
        let description = request.description.clone().or(existing.description.clone());
        let cover_image_url = request
            .cover_image_url
            .clone()
            .or(existing.cover_image_url.clone());

        sqlx::query(
            "UPDATE books SET title = ?, author = ?, genre = ?, description = ?, cover_image_url = ? WHERE id = ?"
        )
        .bind(title)
        .bind(author)
        .bind(&genre)
        .bind(&description)
        .bind(&cover_image_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Book {
            id: id.to_string(),
            title: title.clone(),
            author: author.clone(),
            genre,
            description,
            cover_image_url,
            created_at: existing.created_at,
        })
    }

    /// Delete a book and every dependent row referencing it, atomically.
    pub async fn delete_book(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        for dependent_sql in [
            "DELETE FROM cart_items WHERE book_id = ?",
            "DELETE FROM wishlist WHERE book_id = ?",
            "DELETE FROM comments WHERE book_id = ?",
            "DELETE FROM reactions WHERE book_id = ?",
        ] {
            sqlx::query(dependent_sql).bind(id).execute(&mut *tx).await?;
        }

        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Pick one book uniformly at random from the filtered set.
    pub async fn random_book(&self, filter: &BookFilter) -> Result<Book, AppError> {
        let books = self.list_books(filter).await?;

        books
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| AppError::NotFound("No books found".to_string()))
    }

    // ==================== SUGGESTION OPERATIONS ====================

    /// List all pending suggestions in submission order.
    pub async fn list_suggestions(&self) -> Result<Vec<SuggestedBook>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, author, genre, description, cover_image_url, created_at
               FROM suggestions ORDER BY created_at, rowid"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(suggestion_from_row).collect())
    }

    /// Get a pending suggestion by ID.
    pub async fn get_suggestion(&self, id: &str) -> Result<Option<SuggestedBook>, AppError> {
        let row = sqlx::query(
            "SELECT id, title, author, genre, description, cover_image_url, created_at FROM suggestions WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(suggestion_from_row))
    }

    /// Submit a new suggestion.
    ///
    /// Titles already pending or already in the catalog are rejected with
    /// Conflict so acceptance can never mint a duplicate catalog entry.
    pub async fn create_suggestion(
        &self,
        request: &CreateSuggestionRequest,
    ) -> Result<SuggestedBook, AppError> {
        let pending = sqlx::query("SELECT 1 FROM suggestions WHERE LOWER(title) = LOWER(?) LIMIT 1")
            .bind(&request.title)
            .fetch_optional(&self.pool)
            .await?;
        if pending.is_some() {
            return Err(AppError::Conflict(format!(
                "A suggestion titled '{}' is already pending",
                request.title
            )));
        }

        let in_catalog = sqlx::query("SELECT 1 FROM books WHERE LOWER(title) = LOWER(?) LIMIT 1")
            .bind(&request.title)
            .fetch_optional(&self.pool)
            .await?;
        if in_catalog.is_some() {
            return Err(AppError::Conflict(format!(
                "'{}' already exists in the catalog",
                request.title
            )));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO suggestions (id, title, author, genre, description, cover_image_url, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.author)
        .bind(&request.genre)
        .bind(&request.description)
        .bind(&request.cover_image_url)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(SuggestedBook {
            id,
            title: request.title.clone(),
            author: request.author.clone(),
            genre: request.genre.clone(),
            description: request.description.clone(),
            cover_image_url: request.cover_image_url.clone(),
            created_at: now,
        })
    }

    /// Patch a still-pending suggestion; resolved suggestions no longer exist
    /// and surface as NotFound.
    pub async fn update_suggestion(
        &self,
        id: &str,
        request: &UpdateSuggestionRequest,
    ) -> Result<SuggestedBook, AppError> {
        let existing = self
            .get_suggestion(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Suggestion {} not found", id)))?;

        let title = request.title.as_ref().unwrap_or(&existing.title);

        // Retitling must not collide with the catalog or another pending suggestion
        if !title.eq_ignore_ascii_case(&existing.title) {
            let clash = sqlx::query(
                "SELECT 1 FROM suggestions WHERE LOWER(title) = LOWER(?1) AND id != ?2
                 UNION ALL
                 SELECT 1 FROM books WHERE LOWER(title) = LOWER(?1) LIMIT 1",
            )
            .bind(title)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
            if clash.is_some() {
                return Err(AppError::Conflict(format!(
                    "'{}' already exists as a book or pending suggestion",
                    title
                )));
            }
        }

        let author = request.author.as_ref().unwrap_or(&existing.author);
        let genre = request.genre.clone().or(existing.genre.clone());
        let description = request.description.clone().or(existing.description.clone());
        let cover_image_url = request
            .cover_image_url
            .clone()
            .or(existing.cover_image_url.clone());

        sqlx::query(
            "UPDATE suggestions SET title = ?, author = ?, genre = ?, description = ?, cover_image_url = ? WHERE id = ?"
        )
        .bind(title)
        .bind(author)
        .bind(&genre)
        .bind(&description)
        .bind(&cover_image_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(SuggestedBook {
            id: id.to_string(),
            title: title.clone(),
            author: author.clone(),
            genre,
            description,
            cover_image_url,
            created_at: existing.created_at,
        })
    }

    /// Accept a suggestion: create the catalog book and remove the suggestion
    /// row in one transaction.
    ///
    /// The delete doubles as the Pending-state check: a concurrent accept or
    /// reject that got there first leaves zero rows to delete, and this call
    /// fails NotFound without inserting anything.
    pub async fn accept_suggestion(&self, id: &str) -> Result<Book, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "SELECT id, title, author, genre, description, cover_image_url, created_at FROM suggestions WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let suggestion = row
            .as_ref()
            .map(suggestion_from_row)
            .ok_or_else(|| AppError::NotFound(format!("Suggestion {} not found", id)))?;

        let in_catalog = sqlx::query("SELECT 1 FROM books WHERE LOWER(title) = LOWER(?) LIMIT 1")
            .bind(&suggestion.title)
            .fetch_optional(&mut *tx)
            .await?;
        if in_catalog.is_some() {
            return Err(AppError::Conflict(format!(
                "'{}' already exists in the catalog",
                suggestion.title
            )));
        }

        let deleted = sqlx::query("DELETE FROM suggestions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Suggestion {} not found", id)));
        }

        let book_id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO books (id, title, author, genre, description, cover_image_url, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&book_id)
        .bind(&suggestion.title)
        .bind(&suggestion.author)
        .bind(&suggestion.genre)
        .bind(&suggestion.description)
        .bind(&suggestion.cover_image_url)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Book {
            id: book_id,
            title: suggestion.title,
            author: suggestion.author,
            genre: suggestion.genre,
            description: suggestion.description,
            cover_image_url: suggestion.cover_image_url,
            created_at: now,
        })
    }

    /// Reject (discard) a pending suggestion.
    pub async fn reject_suggestion(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM suggestions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Suggestion {} not found", id)));
        }
        Ok(())
    }

    // ==================== WISHLIST OPERATIONS ====================

    /// Add a book to the caller's wishlist.
    ///
    /// Idempotent: if the (user, book) entry already exists it is returned
    /// as-is instead of erroring.
    pub async fn add_to_wishlist(
        &self,
        user_id: &str,
        book_id: &str,
    ) -> Result<WishlistEntry, AppError> {
        self.ensure_book_exists(book_id).await?;

        let existing = sqlx::query(
            "SELECT id, user_id, book_id, status, availability, date_added FROM wishlist WHERE user_id = ? AND book_id = ?"
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = existing.as_ref() {
            return Ok(wishlist_entry_from_row(row));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let status = WishlistStatus::ForLater;
        // New entries start available; only admins flip the flag afterwards
        let availability = Availability::Available;

        sqlx::query(
            "INSERT INTO wishlist (id, user_id, book_id, status, availability, date_added) VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(user_id)
        .bind(book_id)
        .bind(status.as_str())
        .bind(availability.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(WishlistEntry {
            id,
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            status,
            availability,
            date_added: now,
        })
    }

    /// List the caller's wishlist joined with book display fields.
    pub async fn list_wishlist(&self, user_id: &str) -> Result<Vec<WishlistItem>, AppError> {
        let rows = sqlx::query(
            r#"SELECT w.id, w.book_id, b.title, b.author, b.cover_image_url,
                      w.status, w.availability, w.date_added
               FROM wishlist w
               JOIN books b ON b.id = w.book_id
               WHERE w.user_id = ?
               ORDER BY w.date_added, w.rowid"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(wishlist_item_from_row).collect())
    }

    /// Change the reading status of one of the caller's entries.
    ///
    /// Entries owned by someone else are reported as NotFound rather than
    /// Forbidden so ids are not probeable.
    pub async fn update_wishlist_status(
        &self,
        entry_id: &str,
        user_id: &str,
        status: WishlistStatus,
    ) -> Result<WishlistEntry, AppError> {
        let row = sqlx::query(
            "SELECT id, user_id, book_id, status, availability, date_added FROM wishlist WHERE id = ?"
        )
        .bind(entry_id)
        .fetch_optional(&self.pool)
        .await?;

        let mut entry = row
            .as_ref()
            .map(wishlist_entry_from_row)
            .ok_or_else(|| AppError::NotFound(format!("Wishlist entry {} not found", entry_id)))?;

        if entry.user_id != user_id {
            return Err(AppError::NotFound(format!(
                "Wishlist entry {} not found",
                entry_id
            )));
        }

        sqlx::query("UPDATE wishlist SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(entry_id)
            .execute(&self.pool)
            .await?;

        entry.status = status;
        Ok(entry)
    }

    /// Change the availability flag of an entry (admin operation).
    pub async fn update_wishlist_availability(
        &self,
        entry_id: &str,
        availability: Availability,
    ) -> Result<WishlistEntry, AppError> {
        let row = sqlx::query(
            "SELECT id, user_id, book_id, status, availability, date_added FROM wishlist WHERE id = ?"
        )
        .bind(entry_id)
        .fetch_optional(&self.pool)
        .await?;

        let mut entry = row
            .as_ref()
            .map(wishlist_entry_from_row)
            .ok_or_else(|| AppError::NotFound(format!("Wishlist entry {} not found", entry_id)))?;

        sqlx::query("UPDATE wishlist SET availability = ? WHERE id = ?")
            .bind(availability.as_str())
            .bind(entry_id)
            .execute(&self.pool)
            .await?;

        entry.availability = availability;
        Ok(entry)
    }

    /// Remove the caller's wishlist entry for a book.
    pub async fn remove_from_wishlist(&self, user_id: &str, book_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM wishlist WHERE user_id = ? AND book_id = ?")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Book {} not found in wishlist",
                book_id
            )));
        }
        Ok(())
    }

    // ==================== CART OPERATIONS ====================

    /// Add a book to the caller's cart, merging with an existing line item.
    pub async fn add_cart_item(
        &self,
        user_id: &str,
        request: &AddCartItemRequest,
    ) -> Result<CartItem, AppError> {
        self.ensure_book_exists(&request.book_id).await?;

        let existing = sqlx::query(
            "SELECT id, user_id, book_id, price, quantity FROM cart_items WHERE user_id = ? AND book_id = ?"
        )
        .bind(user_id)
        .bind(&request.book_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = existing.as_ref() {
            let mut item = cart_item_from_row(row);
            item.quantity += request.quantity;

            sqlx::query("UPDATE cart_items SET quantity = ? WHERE id = ?")
                .bind(item.quantity)
                .bind(&item.id)
                .execute(&self.pool)
                .await?;

            return Ok(item);
        }

        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO cart_items (id, user_id, book_id, price, quantity) VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(user_id)
        .bind(&request.book_id)
        .bind(request.price)
        .bind(request.quantity)
        .execute(&self.pool)
        .await?;

        Ok(CartItem {
            id,
            user_id: user_id.to_string(),
            book_id: request.book_id.clone(),
            price: request.price,
            quantity: request.quantity,
        })
    }

    /// The caller's cart with computed totals.
    pub async fn get_cart(&self, user_id: &str) -> Result<CartSummary, AppError> {
        let rows = sqlx::query(
            r#"SELECT c.id, c.book_id, b.title, c.price, c.quantity
               FROM cart_items c
               JOIN books b ON b.id = c.book_id
               WHERE c.user_id = ?
               ORDER BY c.rowid"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let items: Vec<CartItemView> = rows.iter().map(cart_item_view_from_row).collect();
        let total_items: i64 = items.iter().map(|i| i.quantity).sum();
        let total_price: f64 = items.iter().map(|i| i.price * i.quantity as f64).sum();

        Ok(CartSummary {
            items,
            total_items,
            total_price: round_cents(total_price),
        })
    }

    /// Set the quantity of one of the caller's cart items.
    pub async fn set_cart_quantity(
        &self,
        item_id: &str,
        user_id: &str,
        quantity: i64,
    ) -> Result<CartItem, AppError> {
        let row = sqlx::query(
            "SELECT id, user_id, book_id, price, quantity FROM cart_items WHERE id = ?",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        let mut item = row
            .as_ref()
            .map(cart_item_from_row)
            .ok_or_else(|| AppError::NotFound(format!("Cart item {} not found", item_id)))?;

        if item.user_id != user_id {
            return Err(AppError::NotFound(format!(
                "Cart item {} not found",
                item_id
            )));
        }

        sqlx::query("UPDATE cart_items SET quantity = ? WHERE id = ?")
            .bind(quantity)
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        item.quantity = quantity;
        Ok(item)
    }

    /// Remove a single cart item.
    pub async fn remove_cart_item(&self, item_id: &str, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = ? AND user_id = ?")
            .bind(item_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Cart item {} not found",
                item_id
            )));
        }
        Ok(())
    }

    /// Remove every item in the caller's cart.
    pub async fn clear_cart(&self, user_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ==================== COMMENT OPERATIONS ====================

    /// Add a comment to a book.
    ///
    /// An exact duplicate (same book, user and text) is rejected with Conflict.
    pub async fn add_comment(
        &self,
        user_id: &str,
        request: &CreateCommentRequest,
    ) -> Result<Comment, AppError> {
        self.ensure_book_exists(&request.book_id).await?;

        let duplicate = sqlx::query(
            "SELECT 1 FROM comments WHERE book_id = ? AND user_id = ? AND comment_text = ?",
        )
        .bind(&request.book_id)
        .bind(user_id)
        .bind(&request.text)
        .fetch_optional(&self.pool)
        .await?;

        if duplicate.is_some() {
            return Err(AppError::Conflict(
                "Comment already exists for this book and user".to_string(),
            ));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO comments (id, book_id, user_id, comment_text, created_at) VALUES (?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.book_id)
        .bind(user_id)
        .bind(&request.text)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Comment {
            id,
            book_id: request.book_id.clone(),
            user_id: user_id.to_string(),
            text: request.text.clone(),
            created_at: now,
        })
    }

    /// List comments, optionally restricted to one book, in insertion order.
    pub async fn list_comments(&self, filter: &CommentFilter) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, book_id, user_id, comment_text, created_at
               FROM comments
               WHERE (?1 IS NULL OR book_id = ?1)
               ORDER BY created_at, rowid"#,
        )
        .bind(&filter.book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(comment_from_row).collect())
    }

    /// Edit a comment's text; only the author sees their comment.
    pub async fn update_comment(
        &self,
        id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<Comment, AppError> {
        let row = sqlx::query(
            "SELECT id, book_id, user_id, comment_text, created_at FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let mut comment = row
            .as_ref()
            .map(comment_from_row)
            .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", id)))?;

        if comment.user_id != user_id {
            return Err(AppError::NotFound(format!("Comment {} not found", id)));
        }

        sqlx::query("UPDATE comments SET comment_text = ? WHERE id = ?")
            .bind(text)
            .bind(id)
            .execute(&self.pool)
            .await?;

        comment.text = text.to_string();
        Ok(comment)
    }

    /// Delete a comment owned by the caller.
    pub async fn delete_comment(&self, id: &str, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Comment {} not found", id)));
        }
        Ok(())
    }

    // ==================== REACTION OPERATIONS ====================

    /// Add the caller's reaction to a book, or replace its type in place.
    pub async fn upsert_reaction(
        &self,
        user_id: &str,
        book_id: &str,
        reaction_type: &str,
    ) -> Result<Reaction, AppError> {
        self.ensure_book_exists(book_id).await?;

        let existing = sqlx::query(
            "SELECT id, user_id, book_id, reaction_type FROM reactions WHERE user_id = ? AND book_id = ?"
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = existing.as_ref() {
            let mut reaction = reaction_from_row(row);

            sqlx::query("UPDATE reactions SET reaction_type = ? WHERE id = ?")
                .bind(reaction_type)
                .bind(&reaction.id)
                .execute(&self.pool)
                .await?;

            reaction.reaction_type = reaction_type.to_string();
            return Ok(reaction);
        }

        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO reactions (id, user_id, book_id, reaction_type) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(book_id)
        .bind(reaction_type)
        .execute(&self.pool)
        .await?;

        Ok(Reaction {
            id,
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            reaction_type: reaction_type.to_string(),
        })
    }

    /// All reactions on a book.
    pub async fn list_reactions_for_book(&self, book_id: &str) -> Result<Vec<Reaction>, AppError> {
        let rows = sqlx::query(
            "SELECT id, user_id, book_id, reaction_type FROM reactions WHERE book_id = ? ORDER BY rowid"
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(reaction_from_row).collect())
    }

    /// All reactions left by one user.
    pub async fn list_reactions_for_user(&self, user_id: &str) -> Result<Vec<Reaction>, AppError> {
        let rows = sqlx::query(
            "SELECT id, user_id, book_id, reaction_type FROM reactions WHERE user_id = ? ORDER BY rowid"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(reaction_from_row).collect())
    }

    /// Remove the caller's reaction on one book.
    pub async fn delete_reaction(&self, user_id: &str, book_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reactions WHERE user_id = ? AND book_id = ?")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No reaction on book {} for this user",
                book_id
            )));
        }
        Ok(())
    }

    /// Remove every reaction left by the caller.
    pub async fn reset_reactions_for_user(&self, user_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reactions WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "No reactions found for this user".to_string(),
            ));
        }
        Ok(())
    }
}

/// Round a currency amount to two decimal places.
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// Helper functions for row conversion

fn book_from_row(row: &sqlx::sqlite::SqliteRow) -> Book {
    Book {
        id: row.get("id"),
        title: row.get("title"),
        author: row.get("author"),
        genre: row.get("genre"),
        description: row.get("description"),
        cover_image_url: row.get("cover_image_url"),
        created_at: row.get("created_at"),
    }
}

fn suggestion_from_row(row: &sqlx::sqlite::SqliteRow) -> SuggestedBook {
    SuggestedBook {
        id: row.get("id"),
        title: row.get("title"),
        author: row.get("author"),
        genre: row.get("genre"),
        description: row.get("description"),
        cover_image_url: row.get("cover_image_url"),
        created_at: row.get("created_at"),
    }
}

fn wishlist_entry_from_row(row: &sqlx::sqlite::SqliteRow) -> WishlistEntry {
    let status: String = row.get("status");
    let availability: String = row.get("availability");
    WishlistEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        book_id: row.get("book_id"),
        status: WishlistStatus::from_str(&status).unwrap_or(WishlistStatus::ForLater),
        availability: Availability::from_str(&availability).unwrap_or(Availability::Available),
        date_added: row.get("date_added"),
    }
}

fn wishlist_item_from_row(row: &sqlx::sqlite::SqliteRow) -> WishlistItem {
    let status: String = row.get("status");
    let availability: String = row.get("availability");
    WishlistItem {
        id: row.get("id"),
        book_id: row.get("book_id"),
        title: row.get("title"),
        author: row.get("author"),
        cover_image_url: row.get("cover_image_url"),
        status: WishlistStatus::from_str(&status).unwrap_or(WishlistStatus::ForLater),
        availability: Availability::from_str(&availability).unwrap_or(Availability::Available),
        date_added: row.get("date_added"),
    }
}

fn cart_item_from_row(row: &sqlx::sqlite::SqliteRow) -> CartItem {
    CartItem {
        id: row.get("id"),
        user_id: row.get("user_id"),
        book_id: row.get("book_id"),
        price: row.get("price"),
        quantity: row.get("quantity"),
    }
}

fn cart_item_view_from_row(row: &sqlx::sqlite::SqliteRow) -> CartItemView {
    CartItemView {
        id: row.get("id"),
        book_id: row.get("book_id"),
        title: row.get("title"),
        price: row.get("price"),
        quantity: row.get("quantity"),
    }
}

fn comment_from_row(row: &sqlx::sqlite::SqliteRow) -> Comment {
    Comment {
        id: row.get("id"),
        book_id: row.get("book_id"),
        user_id: row.get("user_id"),
        text: row.get("comment_text"),
        created_at: row.get("created_at"),
    }
}

fn reaction_from_row(row: &sqlx::sqlite::SqliteRow) -> Reaction {
    Reaction {
        id: row.get("id"),
        user_id: row.get("user_id"),
        book_id: row.get("book_id"),
        reaction_type: row.get("reaction_type"),
    }
}
