// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (registration, lookup by email)
//! - Courses (listing, creation, seeding with per-hole pars)
//! - Rounds (creation with scores, per-course export)
//! - Friendships (invites, accepts, listing)
//!
//! Parent/child writes (course + hole pars, round + scores) always run in a
//! single transaction. An uncommitted transaction rolls back on drop, so a
//! failing child insert leaves no parent row behind.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{
    Course, Friendship, FriendshipStatus, HolePar, HoleSpec, Round, Score, ScoreSpec, User,
};
use crate::time_utils;

/// Round row joined with the player's name, as the export query returns it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoundExportRow {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub course_id: i64,
    pub started_at: String,
    pub completed: bool,
    pub round_type: String,
    pub shared: bool,
}

/// Friendship row joined with both users, as the listing query returns it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FriendshipWithUsers {
    pub id: i64,
    pub requester_id: i64,
    pub requester_name: String,
    pub requester_email: String,
    pub addressee_id: i64,
    pub addressee_name: String,
    pub addressee_email: String,
    pub status: FriendshipStatus,
    pub created_at: String,
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    holes INTEGER NOT NULL,
    description TEXT,
    address_url TEXT,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS hole_pars (
    course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
    hole_number INTEGER NOT NULL,
    par INTEGER NOT NULL,
    distance_meters INTEGER,
    PRIMARY KEY (course_id, hole_number)
);
CREATE TABLE IF NOT EXISTS rounds (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    course_id INTEGER NOT NULL REFERENCES courses(id),
    started_at TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    round_type TEXT NOT NULL DEFAULT 'casual',
    shared INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS scores (
    round_id INTEGER NOT NULL REFERENCES rounds(id) ON DELETE CASCADE,
    hole_number INTEGER NOT NULL,
    strokes INTEGER NOT NULL,
    PRIMARY KEY (round_id, hole_number)
);
CREATE TABLE IF NOT EXISTS friendships (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    requester_id INTEGER NOT NULL REFERENCES users(id),
    addressee_id INTEGER NOT NULL REFERENCES users(id),
    status TEXT NOT NULL DEFAULT 'PENDING',
    created_at TEXT NOT NULL,
    UNIQUE (requester_id, addressee_id),
    CHECK (requester_id <> addressee_id)
);
CREATE INDEX IF NOT EXISTS idx_rounds_course ON rounds(course_id, started_at);
CREATE INDEX IF NOT EXISTS idx_friendships_addressee ON friendships(addressee_id, status);
CREATE UNIQUE INDEX IF NOT EXISTS idx_friendships_pair
    ON friendships(MIN(requester_id, addressee_id), MAX(requester_id, addressee_id));
";

/// SQLite database client.
#[derive(Clone)]
pub struct SqlDb {
    pool: SqlitePool,
}

impl SqlDb {
    /// Connect to the database and bootstrap the schema.
    ///
    /// Accepts sqlx SQLite URLs (`sqlite://file.db`, `sqlite::memory:`); the
    /// database file is created when missing.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        // A :memory: pool wider than one connection would hand every
        // connection its own empty database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to SQLite: {}", e)))?;

        let db = Self { pool };
        db.init_schema().await?;

        tracing::info!(url = database_url, "Connected to SQLite");

        Ok(db)
    }

    /// Create all tables and indexes if they do not exist yet.
    async fn init_schema(&self) -> Result<(), AppError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Schema bootstrap failed: {}", e)))?;
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create a user. The email must be unique; duplicates answer 409.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: Option<&str>,
    ) -> Result<User, AppError> {
        let now = time_utils::format_utc_rfc3339(chrono::Utc::now());

        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, created_at) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING id, name, email, password_hash, created_at",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Email already registered".to_string())
            }
            _ => AppError::from(e),
        })
    }

    /// Look up a user by email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    // ─── Course Operations ───────────────────────────────────────

    /// List all courses, ordered by name.
    pub async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT id, name, holes, description, address_url, created_at \
             FROM courses ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }

    /// Get a course by id.
    pub async fn get_course(&self, course_id: i64) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, name, holes, description, address_url, created_at \
             FROM courses WHERE id = ?1",
        )
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(course)
    }

    /// Per-hole pars for a course, ordered by hole number.
    pub async fn hole_pars(&self, course_id: i64) -> Result<Vec<HolePar>, AppError> {
        let pars = sqlx::query_as::<_, HolePar>(
            "SELECT course_id, hole_number, par, distance_meters \
             FROM hole_pars WHERE course_id = ?1 ORDER BY hole_number",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(pars)
    }

    /// Create a course together with its per-hole pars.
    ///
    /// The name must be unique; duplicates answer 409.
    pub async fn create_course(
        &self,
        name: &str,
        holes: i64,
        description: Option<&str>,
        address_url: Option<&str>,
        hole_specs: &[HoleSpec],
    ) -> Result<Course, AppError> {
        let now = time_utils::format_utc_rfc3339(chrono::Utc::now());
        let mut tx = self.pool.begin().await?;

        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (name, holes, description, address_url, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) \
             RETURNING id, name, holes, description, address_url, created_at",
        )
        .bind(name)
        .bind(holes)
        .bind(description)
        .bind(address_url)
        .bind(&now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Course already exists".to_string())
            }
            _ => AppError::from(e),
        })?;

        Self::insert_hole_pars(&mut tx, course.id, hole_specs).await?;

        tx.commit().await?;
        Ok(course)
    }

    /// Upsert a course by name, replacing all existing per-hole data.
    ///
    /// Re-invoking with the same specs is idempotent: the resulting hole set
    /// always equals `hole_specs`, regardless of prior state.
    pub async fn seed_course(
        &self,
        name: &str,
        description: Option<&str>,
        address_url: Option<&str>,
        hole_specs: &[HoleSpec],
    ) -> Result<Course, AppError> {
        let holes = hole_specs.len() as i64;
        let now = time_utils::format_utc_rfc3339(chrono::Utc::now());
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Course>(
            "SELECT id, name, holes, description, address_url, created_at \
             FROM courses WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?;

        let course = match existing {
            Some(course) => {
                sqlx::query(
                    "UPDATE courses SET holes = ?1, description = ?2, address_url = ?3 \
                     WHERE id = ?4",
                )
                .bind(holes)
                .bind(description)
                .bind(address_url)
                .bind(course.id)
                .execute(&mut *tx)
                .await?;

                sqlx::query("DELETE FROM hole_pars WHERE course_id = ?1")
                    .bind(course.id)
                    .execute(&mut *tx)
                    .await?;

                sqlx::query_as::<_, Course>(
                    "SELECT id, name, holes, description, address_url, created_at \
                     FROM courses WHERE id = ?1",
                )
                .bind(course.id)
                .fetch_one(&mut *tx)
                .await?
            }
            None => {
                sqlx::query_as::<_, Course>(
                    "INSERT INTO courses (name, holes, description, address_url, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5) \
                     RETURNING id, name, holes, description, address_url, created_at",
                )
                .bind(name)
                .bind(holes)
                .bind(description)
                .bind(address_url)
                .bind(&now)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        Self::insert_hole_pars(&mut tx, course.id, hole_specs).await?;

        tx.commit().await?;
        Ok(course)
    }

    async fn insert_hole_pars(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        course_id: i64,
        hole_specs: &[HoleSpec],
    ) -> Result<(), AppError> {
        for spec in hole_specs {
            sqlx::query(
                "INSERT INTO hole_pars (course_id, hole_number, par, distance_meters) \
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(course_id)
            .bind(spec.hole_number)
            .bind(spec.par)
            .bind(spec.distance_meters)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    // ─── Round Operations ────────────────────────────────────────

    /// Create a round together with one score row per entry, atomically.
    pub async fn create_round(
        &self,
        user_id: i64,
        course_id: i64,
        completed: bool,
        round_type: &str,
        shared: bool,
        scores: &[ScoreSpec],
    ) -> Result<(Round, Vec<Score>), AppError> {
        let started_at = time_utils::format_utc_rfc3339(chrono::Utc::now());
        let mut tx = self.pool.begin().await?;

        let round = sqlx::query_as::<_, Round>(
            "INSERT INTO rounds (user_id, course_id, started_at, completed, round_type, shared) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             RETURNING id, user_id, course_id, started_at, completed, round_type, shared",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(&started_at)
        .bind(completed)
        .bind(round_type)
        .bind(shared)
        .fetch_one(&mut *tx)
        .await?;

        let mut rows = Vec::with_capacity(scores.len());
        for score in scores {
            let row = sqlx::query_as::<_, Score>(
                "INSERT INTO scores (round_id, hole_number, strokes) \
                 VALUES (?1, ?2, ?3) \
                 RETURNING round_id, hole_number, strokes",
            )
            .bind(round.id)
            .bind(score.hole_number)
            .bind(score.strokes)
            .fetch_one(&mut *tx)
            .await?;
            rows.push(row);
        }

        tx.commit().await?;
        Ok((round, rows))
    }

    /// Rounds played on a course with the player's name, newest first.
    pub async fn rounds_for_course(&self, course_id: i64) -> Result<Vec<RoundExportRow>, AppError> {
        let rounds = sqlx::query_as::<_, RoundExportRow>(
            "SELECT r.id, r.user_id, u.name AS user_name, r.course_id, r.started_at, \
                    r.completed, r.round_type, r.shared \
             FROM rounds r JOIN users u ON u.id = r.user_id \
             WHERE r.course_id = ?1 \
             ORDER BY r.started_at DESC, r.id DESC",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rounds)
    }

    /// Scores of a round, ordered by hole number.
    pub async fn scores_for_round(&self, round_id: i64) -> Result<Vec<Score>, AppError> {
        let scores = sqlx::query_as::<_, Score>(
            "SELECT round_id, hole_number, strokes \
             FROM scores WHERE round_id = ?1 ORDER BY hole_number",
        )
        .bind(round_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(scores)
    }

    // ─── Friendship Operations ───────────────────────────────────

    /// Find a friendship between two users, in either direction.
    pub async fn find_friendship_between(
        &self,
        user_a: i64,
        user_b: i64,
    ) -> Result<Option<Friendship>, AppError> {
        let friendship = sqlx::query_as::<_, Friendship>(
            "SELECT id, requester_id, addressee_id, status, created_at \
             FROM friendships \
             WHERE (requester_id = ?1 AND addressee_id = ?2) \
                OR (requester_id = ?2 AND addressee_id = ?1)",
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_optional(&self.pool)
        .await?;
        Ok(friendship)
    }

    /// Create a pending friendship invite.
    ///
    /// The pair index admits at most one row per user pair, so inserting
    /// the reverse direction of an existing friendship maps to a conflict.
    pub async fn create_friendship(
        &self,
        requester_id: i64,
        addressee_id: i64,
    ) -> Result<Friendship, AppError> {
        let now = time_utils::format_utc_rfc3339(chrono::Utc::now());

        let friendship = sqlx::query_as::<_, Friendship>(
            "INSERT INTO friendships (requester_id, addressee_id, status, created_at) \
             VALUES (?1, ?2, 'PENDING', ?3) \
             RETURNING id, requester_id, addressee_id, status, created_at",
        )
        .bind(requester_id)
        .bind(addressee_id)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;
        Ok(friendship)
    }

    /// Accept a pending invite.
    ///
    /// Scoped to the addressee: only `addressee_id`'s own pending invite
    /// matches, anything else returns `None`.
    pub async fn accept_friendship(
        &self,
        friendship_id: i64,
        addressee_id: i64,
    ) -> Result<Option<Friendship>, AppError> {
        let friendship = sqlx::query_as::<_, Friendship>(
            "UPDATE friendships SET status = 'ACCEPTED' \
             WHERE id = ?1 AND addressee_id = ?2 AND status = 'PENDING' \
             RETURNING id, requester_id, addressee_id, status, created_at",
        )
        .bind(friendship_id)
        .bind(addressee_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(friendship)
    }

    /// All friendships involving a user, joined with both users, newest first.
    pub async fn friendships_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<FriendshipWithUsers>, AppError> {
        let friendships = sqlx::query_as::<_, FriendshipWithUsers>(
            "SELECT f.id, f.requester_id, ru.name AS requester_name, ru.email AS requester_email, \
                    f.addressee_id, au.name AS addressee_name, au.email AS addressee_email, \
                    f.status, f.created_at \
             FROM friendships f \
             JOIN users ru ON ru.id = f.requester_id \
             JOIN users au ON au.id = f.addressee_id \
             WHERE f.requester_id = ?1 OR f.addressee_id = ?1 \
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(friendships)
    }
}
