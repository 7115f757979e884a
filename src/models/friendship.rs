// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friendship model: a directed invite between two users.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Friendship row in the relational store.
///
/// At most one row exists per user pair, whichever direction the invite
/// went, and the two users are always distinct.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Friendship {
    pub id: i64,
    /// User who sent the invite
    pub requester_id: i64,
    /// User the invite is addressed to
    pub addressee_id: i64,
    pub status: FriendshipStatus,
    /// When the invite was sent (RFC 3339 UTC)
    pub created_at: String,
}

/// Stored as uppercase TEXT in the relational store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_uppercase() {
        let pending = serde_json::to_string(&FriendshipStatus::Pending).unwrap();
        assert_eq!(pending, "\"PENDING\"");
        let accepted = serde_json::to_string(&FriendshipStatus::Accepted).unwrap();
        assert_eq!(accepted, "\"ACCEPTED\"");
    }

    #[cfg(feature = "binding-generation")]
    #[test]
    fn test_status_binding_carries_wire_names() {
        use ts_rs::TS;

        let decl = FriendshipStatus::decl();
        assert!(decl.contains("\"PENDING\""), "{}", decl);
        assert!(decl.contains("\"ACCEPTED\""), "{}", decl);
    }
}
