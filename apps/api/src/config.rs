use anyhow::{Context, Result};

use crate::matching::similarity::SimilarityBackend;

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare environment boots with the embedded catalog.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Optional JSON catalog file. `None` uses the catalog compiled into the binary.
    pub catalog_path: Option<String>,
    pub similarity_backend: SimilarityBackend,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            catalog_path: optional_env("CATALOG_PATH"),
            similarity_backend: optional_env("SIMILARITY_BACKEND")
                .map(|raw| raw.parse::<SimilarityBackend>())
                .transpose()
                .context("SIMILARITY_BACKEND must be 'positional' or 'vocabulary'")?
                .unwrap_or_default(),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
