// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - reusable application components.

pub mod notify;
pub mod password;

pub use notify::{Toast, ToastLevel, ToastStore, ToastSubscription};
