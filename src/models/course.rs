// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Course and per-hole par models.

use serde::{Deserialize, Serialize};

/// Course row in the relational store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    /// Row id
    pub id: i64,
    /// Course name, unique
    pub name: String,
    /// Number of holes on the course
    pub holes: i64,
    /// Free-form description
    pub description: Option<String>,
    /// Link to a map of the course
    pub address_url: Option<String>,
    /// When the course was created (RFC 3339 UTC)
    pub created_at: String,
}

/// Reference par (and optional length) for one hole of a course.
///
/// A course's rows cover holes `1..=holes` exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HolePar {
    /// Owning course
    pub course_id: i64,
    /// Hole number, 1-based
    pub hole_number: i64,
    /// Par for the hole
    pub par: i64,
    /// Tee-to-basket length in meters
    pub distance_meters: Option<i64>,
}

/// Per-hole data supplied when creating or seeding a course.
#[derive(Debug, Clone, Copy)]
pub struct HoleSpec {
    pub hole_number: i64,
    pub par: i64,
    pub distance_meters: Option<i64>,
}
