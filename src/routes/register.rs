// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration route.

use crate::error::{AppError, Result};
use crate::services::password;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Registration route (public, no auth required).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/register", post(register))
}

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegisterResponse {
    pub ok: bool,
}

/// Register a new account.
///
/// The password is hashed before storage; duplicate emails answer 409.
async fn register(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<Json<RegisterResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let password_hash = password::hash_password(&payload.password)?;

    let user = state
        .db
        .create_user(&payload.name, &payload.email, Some(&password_hash))
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok(Json(RegisterResponse { ok: true }))
}
