//! Database layer (SQLite + Firestore).

pub mod firestore;
pub mod sql;

pub use firestore::RealtimeDb;
pub use sql::SqlDb;

/// Firestore collection names as constants.
pub mod collections {
    pub const ROUNDS: &str = "rounds";
    /// Per-hole scores (keyed by `"{round_id}_{hole_number}"`)
    pub const ROUND_SCORES: &str = "round_scores";
}
