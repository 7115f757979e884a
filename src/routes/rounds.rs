// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Round routes: creation and per-course export.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::ScoreSpec;
use crate::time_utils;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Round routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/rounds", post(create_round))
        .route("/api/export/rounds", get(export_rounds))
}

// ─── Round Creation ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ScoreEntry {
    /// Hole number, 1-based
    pub hole: i64,
    pub strokes: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoundRequest {
    pub course_id: i64,
    pub round_type: Option<String>,
    pub shared: Option<bool>,
    pub scores: Vec<ScoreEntry>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScoreResponse {
    pub hole: i64,
    pub strokes: i64,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct RoundResponse {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub started_at: String,
    pub completed: bool,
    pub round_type: String,
    pub shared: bool,
    pub scores: Vec<ScoreResponse>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateRoundResponse {
    pub round: RoundResponse,
}

/// Record a played round with its scores.
///
/// The round and its score rows are written in one transaction.
async fn create_round(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateRoundRequest>, AppError>,
) -> Result<Json<CreateRoundResponse>> {
    let course = state
        .db
        .get_course(payload.course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    for entry in &payload.scores {
        if entry.hole < 1 || entry.hole > course.holes {
            return Err(AppError::BadRequest(format!(
                "Hole {} is not on this course",
                entry.hole
            )));
        }
        if entry.strokes < 1 {
            return Err(AppError::BadRequest(format!(
                "Strokes for hole {} must be positive",
                entry.hole
            )));
        }
    }

    let specs: Vec<ScoreSpec> = payload
        .scores
        .iter()
        .map(|entry| ScoreSpec {
            hole_number: entry.hole,
            strokes: entry.strokes,
        })
        .collect();

    let completed = specs.len() as i64 == course.holes;
    let round_type = payload.round_type.as_deref().unwrap_or("casual");
    let shared = payload.shared.unwrap_or(false);

    let (round, scores) = state
        .db
        .create_round(user.user_id, course.id, completed, round_type, shared, &specs)
        .await?;

    tracing::info!(
        user_id = user.user_id,
        round_id = round.id,
        course_id = course.id,
        score_count = scores.len(),
        "Round recorded"
    );

    Ok(Json(CreateRoundResponse {
        round: RoundResponse {
            id: round.id,
            user_id: round.user_id,
            course_id: round.course_id,
            started_at: round.started_at,
            completed: round.completed,
            round_type: round.round_type,
            shared: round.shared,
            scores: scores
                .into_iter()
                .map(|score| ScoreResponse {
                    hole: score.hole_number,
                    strokes: score.strokes,
                })
                .collect(),
        },
    }))
}

// ─── Export ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportQuery {
    /// Course to export rounds for
    course_id: Option<i64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ExportRoundResponse {
    pub id: i64,
    pub player: String,
    pub course_id: i64,
    pub started_at: String,
    /// Display date (dd.mm.yyyy) derived from `started_at`
    pub played_on: String,
    pub completed: bool,
    pub round_type: String,
    pub shared: bool,
    pub scores: Vec<ScoreResponse>,
    /// Sum of strokes over the round
    pub total: i64,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExportRoundsResponse {
    pub rounds: Vec<ExportRoundResponse>,
}

/// Export all rounds played on a course, newest first.
///
/// An unknown course exports an empty list rather than an error.
async fn export_rounds(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<ExportRoundsResponse>> {
    let course_id = query
        .course_id
        .ok_or_else(|| AppError::BadRequest("courseId query parameter is required".to_string()))?;

    let mut rounds = Vec::new();
    for row in state.db.rounds_for_course(course_id).await? {
        let scores = state.db.scores_for_round(row.id).await?;
        let total = scores.iter().map(|score| score.strokes).sum();
        let played_on = time_utils::parse_utc_rfc3339(&row.started_at)
            .map(time_utils::format_display_date)
            .unwrap_or_else(|| row.started_at.clone());

        rounds.push(ExportRoundResponse {
            id: row.id,
            player: row.user_name,
            course_id: row.course_id,
            started_at: row.started_at,
            played_on,
            completed: row.completed,
            round_type: row.round_type,
            shared: row.shared,
            scores: scores
                .into_iter()
                .map(|score| ScoreResponse {
                    hole: score.hole_number,
                    strokes: score.strokes,
                })
                .collect(),
            total,
        });
    }

    Ok(Json(ExportRoundsResponse { rounds }))
}
