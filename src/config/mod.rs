//! Configuration module for the book club backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Emoji allow-list used when BOOKCLUB_REACTION_EMOJIS is not set.
pub const DEFAULT_REACTION_EMOJIS: &str = "👍,❤️,😂,🎉,😢,😡";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emoji reaction types accepted by the reaction endpoints
    pub reaction_emojis: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("BOOKCLUB_API_PSK").ok();

        let db_path = env::var("BOOKCLUB_DB_PATH")
            .unwrap_or_else(|_| "./data/bookclub.sqlite".to_string())
            .into();

        let bind_addr = env::var("BOOKCLUB_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid BOOKCLUB_BIND_ADDR format");

        let log_level = env::var("BOOKCLUB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let reaction_emojis = parse_emoji_list(
            &env::var("BOOKCLUB_REACTION_EMOJIS")
                .unwrap_or_else(|_| DEFAULT_REACTION_EMOJIS.to_string()),
        );

        Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            reaction_emojis,
        }
    }

    /// Whether the given reaction type is in the configured allow-list.
    pub fn is_allowed_reaction(&self, reaction_type: &str) -> bool {
        self.reaction_emojis.iter().any(|e| e == reaction_type)
    }
}

fn parse_emoji_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .collect()
}
