// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Round and score models for both backing stores.

use serde::{Deserialize, Serialize};

/// Round row in the relational store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Round {
    /// Row id
    pub id: i64,
    /// Player who recorded the round
    pub user_id: i64,
    /// Course the round was played on
    pub course_id: i64,
    /// When play started (RFC 3339 UTC)
    pub started_at: String,
    /// Whether all holes were played
    pub completed: bool,
    /// Tag such as "casual" or "tournament"
    pub round_type: String,
    /// Whether the round is visible to friends
    pub shared: bool,
}

/// One score entry supplied when creating a round, on either store.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScoreSpec {
    /// Hole number, 1-based
    pub hole_number: i64,
    /// Strokes taken on the hole
    pub strokes: i64,
}

/// One hole's stroke count within a round.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Score {
    /// Owning round
    pub round_id: i64,
    /// Hole number, 1-based
    pub hole_number: i64,
    /// Strokes taken on the hole
    pub strokes: i64,
}

/// Round document in the realtime store (document id = `id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeRound {
    /// UUID assigned at creation
    pub id: String,
    /// Owner, matching the relational user id
    pub user_id: i64,
    /// Course the round was played on
    pub course_id: i64,
    /// When play started (RFC 3339 UTC)
    pub started_at: String,
    pub completed: bool,
    pub round_type: String,
    pub shared: bool,
}

/// Score document in the realtime store (document id = `"{round_id}_{hole_number}"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeScore {
    /// Owning round's UUID
    pub round_id: String,
    /// Owner, denormalized for per-user queries
    pub user_id: i64,
    /// Hole number, 1-based
    pub hole_number: i64,
    /// Strokes taken on the hole
    pub strokes: i64,
}
