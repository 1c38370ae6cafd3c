use std::env;

use phase10_persistence::DEFAULT_STORAGE_KEY;
use phase10_persistence::connection::DEFAULT_DATABASE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub storage_key: String,
    /// Start from an empty store instead of refusing to start when the
    /// stored snapshot cannot be decoded.
    pub discard_corrupt_snapshot: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            storage_key: env::var("STORAGE_KEY")
                .unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string()),
            discard_corrupt_snapshot: env::var("DISCARD_CORRUPT_SNAPSHOT")
                .map(|value| parse_flag(&value))
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
