//! Book Club Backend
//!
//! A production-grade REST backend for the student book club: catalog,
//! suggestion moderation, wishlists, carts, comments and emoji reactions,
//! all persisted in SQLite.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Book Club Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (BOOKCLUB_API_PSK). Authentication is disabled!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Catalog
        .route("/books", get(api::list_books))
        .route("/books", post(api::create_book))
        .route("/books/random", get(api::random_book))
        .route("/books/{id}", get(api::get_book))
        .route("/books/{id}", put(api::update_book))
        .route("/books/{id}", delete(api::delete_book))
        // Suggestions
        .route("/suggest", get(api::list_suggestions))
        .route("/suggest", post(api::create_suggestion))
        .route("/suggest/{id}", get(api::get_suggestion))
        .route("/suggest/{id}", put(api::update_suggestion))
        .route("/suggest/{id}/accept", post(api::accept_suggestion))
        .route("/suggest/{id}/reject", post(api::reject_suggestion))
        // Wishlist
        .route("/wishlist", get(api::list_wishlist))
        .route("/wishlist", post(api::add_to_wishlist))
        .route("/wishlist/{id}/status", put(api::update_wishlist_status))
        .route(
            "/wishlist/{id}/availability",
            put(api::update_wishlist_availability),
        )
        .route("/wishlist/{id}", delete(api::remove_from_wishlist))
        // Cart
        .route("/cart", get(api::get_cart))
        .route("/cart", post(api::add_cart_item))
        .route("/cart", delete(api::clear_cart))
        .route("/cart/{id}", put(api::update_cart_item))
        .route("/cart/{id}", delete(api::remove_cart_item))
        // Comments
        .route("/comments", get(api::list_comments))
        .route("/comments", post(api::create_comment))
        .route("/comments/{id}", put(api::update_comment))
        .route("/comments/{id}", delete(api::delete_comment))
        // Reactions
        .route("/reactions", put(api::upsert_reaction))
        .route("/reactions", delete(api::reset_reactions))
        .route("/reactions/emojis", get(api::list_emojis))
        .route("/reactions/mine", get(api::list_my_reactions))
        .route("/reactions/book/{id}", get(api::list_reactions_for_book))
        .route("/reactions/{id}", delete(api::delete_reaction))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
