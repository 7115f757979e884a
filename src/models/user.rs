//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User row in the relational store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Row id (also the subject of session JWTs)
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address, unique per user
    pub email: String,
    /// Argon2 hash; None for externally provisioned accounts
    pub password_hash: Option<String>,
    /// When the account was created (RFC 3339 UTC)
    pub created_at: String,
}
