// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Disc golf round tracker: course data, score entry and friend invites.
//!
//! This crate provides the backend JSON API over SQLite, the realtime
//! round functions over Firestore, and the small reusable pieces the
//! frontend consumes (toast store, date helpers).

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{RealtimeDb, SqlDb};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SqlDb,
    pub realtime: RealtimeDb,
}
