//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string for the relational store
    pub database_url: String,
    /// GCP project hosting the realtime (Firestore) store
    pub firestore_project_id: String,
    /// Frontend URL for the CORS allow-list
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session token verification (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `FIRESTORE_PROJECT_ID` and `JWT_SIGNING_KEY` are required; startup
    /// fails fast when either is absent. Everything else has a local-dev
    /// default.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://discgolf.db".to_string()),
            firestore_project_id: env::var("FIRESTORE_PROJECT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FIRESTORE_PROJECT_ID"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Fixed config for tests: in-memory database, offline project id,
    /// known signing key.
    pub fn test_default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            firestore_project_id: "test-project".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
