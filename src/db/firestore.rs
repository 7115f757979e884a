// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper for the realtime round surface.
//!
//! Clients call these operations directly rather than through the HTTP API;
//! they are scoped by an explicit owner id instead of a session. Provides:
//! - Rounds (creation with scores, per-user listing)
//! - Scores (per-round listing)

use crate::db::collections;
use crate::error::AppError;
use crate::models::{RealtimeRound, RealtimeScore, ScoreSpec};
use crate::time_utils;

/// Firestore database client.
#[derive(Clone)]
pub struct RealtimeDb {
    client: Option<firestore::FirestoreDb>,
}

impl RealtimeDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Round Operations ────────────────────────────────────────

    /// Get a round by its document id.
    pub async fn get_round(&self, round_id: &str) -> Result<Option<RealtimeRound>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ROUNDS)
            .obj()
            .one(round_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Rounds recorded by a user, newest first.
    pub async fn rounds_for_user(&self, user_id: i64) -> Result<Vec<RealtimeRound>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ROUNDS)
            .filter(move |q| q.field("user_id").eq(user_id))
            .order_by([(
                "started_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Scores of a round, ordered by hole number.
    pub async fn scores_for_round(&self, round_id: &str) -> Result<Vec<RealtimeScore>, AppError> {
        let round_id = round_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ROUND_SCORES)
            .filter(move |q| q.field("round_id").eq(round_id.clone()))
            .order_by([(
                "hole_number",
                firestore::FirestoreQueryDirection::Ascending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Atomic Round Creation ───────────────────────────────────

    /// Atomically create a round together with one score document per entry.
    ///
    /// This method uses a Firestore transaction so all writes succeed or fail
    /// together; a failing score write leaves no round document behind.
    pub async fn create_round(
        &self,
        user_id: i64,
        course_id: i64,
        scores: &[ScoreSpec],
    ) -> Result<RealtimeRound, AppError> {
        let round = RealtimeRound {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            course_id,
            started_at: time_utils::format_utc_rfc3339(chrono::Utc::now()),
            completed: !scores.is_empty(),
            round_type: "casual".to_string(),
            shared: false,
        };

        let mut transaction = self
            .get_client()?
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        self.get_client()?
            .fluent()
            .update()
            .in_col(collections::ROUNDS)
            .document_id(&round.id)
            .object(&round)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add round to transaction: {}", e))
            })?;

        for score in scores {
            let record = RealtimeScore {
                round_id: round.id.clone(),
                user_id,
                hole_number: score.hole_number,
                strokes: score.strokes,
            };
            // Document ID: combine round id and hole number to ensure uniqueness
            let doc_id = format!("{}_{}", round.id, score.hole_number);

            self.get_client()?
                .fluent()
                .update()
                .in_col(collections::ROUND_SCORES)
                .document_id(&doc_id)
                .object(&record)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!("Failed to add score to transaction: {}", e))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            user_id,
            round_id = %round.id,
            score_count = scores.len(),
            "Round created atomically"
        );

        Ok(round)
    }
}
