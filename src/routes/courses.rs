// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Course routes: listing, creation and seeding.

use crate::error::{AppError, Result};
use crate::models::{Course, HoleSpec};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Fixed (hole, par, distance in meters) table for the Ekeberg course.
const EKEBERG_HOLES: [(i64, i64, i64); 18] = [
    (1, 3, 78),
    (2, 3, 62),
    (3, 3, 54),
    (4, 3, 93),
    (5, 3, 71),
    (6, 4, 118),
    (7, 3, 86),
    (8, 3, 64),
    (9, 3, 52),
    (10, 3, 81),
    (11, 4, 126),
    (12, 3, 73),
    (13, 3, 59),
    (14, 3, 95),
    (15, 4, 132),
    (16, 3, 88),
    (17, 3, 67),
    (18, 3, 76),
];

/// Course routes (public, no auth required).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/courses", get(list_courses).post(create_course))
        .route("/api/courses/seed-ekeberg", post(seed_ekeberg))
}

// ─── Responses ───────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct HoleParResponse {
    pub hole_number: i64,
    pub par: i64,
    pub distance_meters: Option<i64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub name: String,
    pub holes: i64,
    pub description: Option<String>,
    pub address_url: Option<String>,
    pub pars: Vec<HoleParResponse>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateCourseResponse {
    pub course: CourseResponse,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SeedCourseResponse {
    pub ok: bool,
    pub course: CourseResponse,
}

async fn course_response(state: &AppState, course: Course) -> Result<CourseResponse> {
    let pars = state
        .db
        .hole_pars(course.id)
        .await?
        .into_iter()
        .map(|par| HoleParResponse {
            hole_number: par.hole_number,
            par: par.par,
            distance_meters: par.distance_meters,
        })
        .collect();

    Ok(CourseResponse {
        id: course.id,
        name: course.name,
        holes: course.holes,
        description: course.description,
        address_url: course.address_url,
        pars,
    })
}

// ─── Listing ─────────────────────────────────────────────────

/// List all courses with their per-hole pars.
async fn list_courses(State(state): State<Arc<AppState>>) -> Result<Json<CourseListResponse>> {
    let mut courses = Vec::new();
    for course in state.db.list_courses().await? {
        courses.push(course_response(&state, course).await?);
    }
    Ok(Json(CourseListResponse { courses }))
}

// ─── Creation ────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "Course name must not be empty"))]
    pub name: String,
    #[validate(range(min = 1, message = "A course needs at least one hole"))]
    pub holes: i64,
    /// Par per hole, in hole order
    pub pars: Vec<i64>,
    pub description: Option<String>,
    pub address_url: Option<String>,
    /// Optional distance per hole, in hole order
    pub distances: Option<Vec<i64>>,
}

/// Create a course together with its per-hole pars.
async fn create_course(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateCourseRequest>, AppError>,
) -> Result<Json<CreateCourseResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if payload.pars.len() as i64 != payload.holes {
        return Err(AppError::BadRequest("Expected one par per hole".to_string()));
    }
    if let Some(distances) = &payload.distances {
        if distances.len() as i64 != payload.holes {
            return Err(AppError::BadRequest(
                "Expected one distance per hole".to_string(),
            ));
        }
    }

    let specs: Vec<HoleSpec> = payload
        .pars
        .iter()
        .enumerate()
        .map(|(index, par)| HoleSpec {
            hole_number: index as i64 + 1,
            par: *par,
            distance_meters: payload.distances.as_ref().map(|d| d[index]),
        })
        .collect();

    let course = state
        .db
        .create_course(
            &payload.name,
            payload.holes,
            payload.description.as_deref(),
            payload.address_url.as_deref(),
            &specs,
        )
        .await?;

    tracing::info!(course_id = course.id, name = %course.name, "Course created");

    Ok(Json(CreateCourseResponse {
        course: course_response(&state, course).await?,
    }))
}

// ─── Seeding ─────────────────────────────────────────────────

/// Upsert the Ekeberg course with its fixed par/distance table.
///
/// Idempotent: the per-hole rows always end up equal to the table.
async fn seed_ekeberg(State(state): State<Arc<AppState>>) -> Result<Json<SeedCourseResponse>> {
    let specs: Vec<HoleSpec> = EKEBERG_HOLES
        .iter()
        .map(|&(hole_number, par, distance)| HoleSpec {
            hole_number,
            par,
            distance_meters: Some(distance),
        })
        .collect();

    let course = state
        .db
        .seed_course(
            "Ekeberg",
            Some("18 hole disc golf course in Ekebergparken, Oslo"),
            Some("https://maps.google.com/?q=Ekebergparken+Frisbeegolf"),
            &specs,
        )
        .await?;

    tracing::info!(course_id = course.id, "Ekeberg course seeded");

    Ok(Json(SeedCourseResponse {
        ok: true,
        course: course_response(&state, course).await?,
    }))
}
