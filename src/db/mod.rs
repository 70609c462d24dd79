//! Database module for SQLite persistence.
//!
//! SQLite is the single datastore shared by every component; the catalog's
//! `books` table is the source of truth all dependent tables reference.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS books (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            genre TEXT,
            description TEXT,
            cover_image_url TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS suggestions (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            genre TEXT,
            description TEXT,
            cover_image_url TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS wishlist (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            book_id TEXT NOT NULL REFERENCES books(id),
            status TEXT NOT NULL,
            availability TEXT NOT NULL,
            date_added TEXT NOT NULL,
            UNIQUE(user_id, book_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cart_items (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            book_id TEXT NOT NULL REFERENCES books(id),
            price REAL NOT NULL,
            quantity INTEGER NOT NULL,
            UNIQUE(user_id, book_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id TEXT PRIMARY KEY,
            book_id TEXT NOT NULL REFERENCES books(id),
            user_id TEXT NOT NULL,
            comment_text TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reactions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            book_id TEXT NOT NULL REFERENCES books(id),
            reaction_type TEXT NOT NULL,
            UNIQUE(user_id, book_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Indexes for common lookups
    for index_sql in [
        "CREATE INDEX IF NOT EXISTS idx_books_genre ON books(genre)",
        "CREATE INDEX IF NOT EXISTS idx_suggestions_title ON suggestions(title)",
        "CREATE INDEX IF NOT EXISTS idx_wishlist_user ON wishlist(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_cart_items_user ON cart_items(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_comments_book ON comments(book_id)",
        "CREATE INDEX IF NOT EXISTS idx_reactions_user ON reactions(user_id)",
    ] {
        sqlx::query(index_sql).execute(pool).await?;
    }

    Ok(())
}
