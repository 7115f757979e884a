// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod course;
pub mod friendship;
pub mod round;
pub mod user;

pub use course::{Course, HolePar, HoleSpec};
pub use friendship::{Friendship, FriendshipStatus};
pub use round::{RealtimeRound, RealtimeScore, Round, Score, ScoreSpec};
pub use user::User;
