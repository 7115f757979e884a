// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Friendship routes: listing, invites and accepts.

use crate::db::sql::FriendshipWithUsers;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Friendship, FriendshipStatus};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Friendship routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/friends", get(list_friends))
        .route("/api/friends/invite", post(invite_friend))
        .route("/api/friends/accept", post(accept_friend))
}

// ─── Responses ───────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipResponse {
    pub id: i64,
    pub requester_id: i64,
    pub addressee_id: i64,
    pub status: FriendshipStatus,
    pub created_at: String,
}

impl From<Friendship> for FriendshipResponse {
    fn from(friendship: Friendship) -> Self {
        Self {
            id: friendship.id,
            requester_id: friendship.requester_id,
            addressee_id: friendship.addressee_id,
            status: friendship.status,
            created_at: friendship.created_at,
        }
    }
}

/// The other party of a friendship, as seen from the session user.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FriendEntry {
    pub friendship_id: i64,
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FriendsListResponse {
    /// Accepted friendships, either direction
    pub friends: Vec<FriendEntry>,
    /// Pending invites addressed to the session user
    pub incoming: Vec<FriendEntry>,
    /// Pending invites the session user sent
    pub outgoing: Vec<FriendEntry>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InviteResponse {
    pub invite: FriendshipResponse,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AcceptResponse {
    pub friendship: FriendshipResponse,
}

// ─── Listing ─────────────────────────────────────────────────

fn entry_for(user_id: i64, row: &FriendshipWithUsers) -> FriendEntry {
    // Show whichever side of the friendship is not the session user.
    let (other_id, other_name, other_email) = if row.requester_id == user_id {
        (row.addressee_id, &row.addressee_name, &row.addressee_email)
    } else {
        (row.requester_id, &row.requester_name, &row.requester_email)
    };

    FriendEntry {
        friendship_id: row.id,
        user_id: other_id,
        name: other_name.clone(),
        email: other_email.clone(),
        created_at: row.created_at.clone(),
    }
}

/// List accepted friends plus pending invites in both directions.
async fn list_friends(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<FriendsListResponse>> {
    let mut friends = Vec::new();
    let mut incoming = Vec::new();
    let mut outgoing = Vec::new();

    for row in state.db.friendships_for_user(user.user_id).await? {
        let entry = entry_for(user.user_id, &row);
        match row.status {
            FriendshipStatus::Accepted => friends.push(entry),
            FriendshipStatus::Pending if row.addressee_id == user.user_id => incoming.push(entry),
            FriendshipStatus::Pending => outgoing.push(entry),
        }
    }

    Ok(Json(FriendsListResponse {
        friends,
        incoming,
        outgoing,
    }))
}

// ─── Invites ─────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct InviteRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

/// Send a friend invite to the user behind an email address.
async fn invite_friend(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<InviteRequest>, AppError>,
) -> Result<Json<InviteResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let addressee = state
        .db
        .find_user_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if addressee.id == user.user_id {
        return Err(AppError::BadRequest(
            "You cannot invite yourself".to_string(),
        ));
    }

    if state
        .db
        .find_friendship_between(user.user_id, addressee.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Friendship already exists".to_string()));
    }

    let invite = state
        .db
        .create_friendship(user.user_id, addressee.id)
        .await?;

    tracing::info!(
        requester_id = user.user_id,
        addressee_id = addressee.id,
        "Friend invite sent"
    );

    Ok(Json(InviteResponse {
        invite: invite.into(),
    }))
}

// ─── Accepts ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptRequest {
    pub friendship_id: i64,
}

/// Accept a pending invite addressed to the session user.
async fn accept_friend(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<AcceptRequest>, AppError>,
) -> Result<Json<AcceptResponse>> {
    let friendship = state
        .db
        .accept_friendship(payload.friendship_id, user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Invite not found".to_string()))?;

    tracing::info!(
        friendship_id = friendship.id,
        user_id = user.user_id,
        "Friend invite accepted"
    );

    Ok(Json(AcceptResponse {
        friendship: friendship.into(),
    }))
}
