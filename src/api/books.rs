//! Catalog API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Book, BookFilter, CreateBookRequest, UpdateBookRequest};
use crate::AppState;

/// GET /api/books - List catalog books, optionally filtered by genre/author.
pub async fn list_books(
    State(state): State<AppState>,
    Query(filter): Query<BookFilter>,
) -> ApiResult<Vec<Book>> {
    match state.repo.list_books(&filter).await {
        Ok(books) => success(books),
        Err(e) => error(e),
    }
}

/// GET /api/books/:id - Get a single book.
pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Book> {
    match state.repo.get_book(&id).await {
        Ok(Some(book)) => success(book),
        Ok(None) => error(AppError::NotFound(format!("Book {} not found", id))),
        Err(e) => error(e),
    }
}

/// GET /api/books/random - Pick one book uniformly from the filtered set.
pub async fn random_book(
    State(state): State<AppState>,
    Query(filter): Query<BookFilter>,
) -> ApiResult<Book> {
    match state.repo.random_book(&filter).await {
        Ok(book) => success(book),
        Err(e) => error(e),
    }
}

/// POST /api/books - Create a new catalog book.
pub async fn create_book(
    State(state): State<AppState>,
    Json(request): Json<CreateBookRequest>,
) -> ApiResult<Book> {
    // Validate required fields
    if request.title.trim().is_empty() {
        return error(AppError::Validation("Title is required".to_string()));
    }
    if request.author.trim().is_empty() {
        return error(AppError::Validation("Author is required".to_string()));
    }

    match state.repo.create_book(&request).await {
        Ok(book) => success(book),
        Err(e) => error(e),
    }
}

/// PUT /api/books/:id - Partially update a book.
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBookRequest>,
) -> ApiResult<Book> {
    // Provided fields may not blank out required ones
    if matches!(&request.title, Some(t) if t.trim().is_empty()) {
        return error(AppError::Validation("Title cannot be empty".to_string()));
    }
    if matches!(&request.author, Some(a) if a.trim().is_empty()) {
        return error(AppError::Validation("Author cannot be empty".to_string()));
    }

    match state.repo.update_book(&id, &request).await {
        Ok(book) => success(book),
        Err(e) => error(e),
    }
}

/// DELETE /api/books/:id - Delete a book and its dependent rows.
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    match state.repo.delete_book(&id).await {
        Ok(()) => success(()),
        Err(e) => error(e),
    }
}
