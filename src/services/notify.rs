// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transient notification store for the presentation layer.
//!
//! An injectable, owned list of toast messages with an explicit observer
//! list. Every mutation notifies each subscriber with a snapshot of the full
//! current list; an added toast is removed automatically after the dismiss
//! delay unless removed sooner. All operations are synchronous; only the
//! expiry timer runs on the Tokio runtime.

use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Auto-dismiss delay applied by [`ToastStore::new`].
const DEFAULT_DISMISS_DELAY: Duration = Duration::from_secs(5);

/// Severity of a toast message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient UI notification message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Counter-derived id, unique within the owning store
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub level: ToastLevel,
}

type Listener = Arc<dyn Fn(&[Toast]) + Send + Sync>;

struct Inner {
    next_toast_id: u64,
    next_listener_id: u64,
    toasts: Vec<Toast>,
    listeners: Vec<(u64, Listener)>,
}

/// Shared handle to a toast list with subscribe/add/remove/clear.
#[derive(Clone)]
pub struct ToastStore {
    inner: Arc<Mutex<Inner>>,
    dismiss_delay: Duration,
}

/// Subscription guard returned by [`ToastStore::subscribe`].
///
/// Dropping the guard unregisters the listener.
pub struct ToastSubscription {
    inner: Arc<Mutex<Inner>>,
    listener_id: u64,
}

impl ToastStore {
    /// Create a store with the default 5 second dismiss delay.
    pub fn new() -> Self {
        Self::with_dismiss_delay(DEFAULT_DISMISS_DELAY)
    }

    /// Create a store with a custom dismiss delay.
    ///
    /// Tests use short delays so they never wait for real-world durations.
    pub fn with_dismiss_delay(dismiss_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_toast_id: 1,
                next_listener_id: 1,
                toasts: Vec::new(),
                listeners: Vec::new(),
            })),
            dismiss_delay,
        }
    }

    /// Add a toast and schedule its automatic removal.
    ///
    /// Returns the assigned id. Insertion order is preserved; subscribers are
    /// notified with the list as of this add.
    pub fn add(&self, title: &str, description: Option<&str>, level: ToastLevel) -> u64 {
        let (id, snapshot, listeners) = {
            let mut inner = self.inner.lock().unwrap();
            let id = inner.next_toast_id;
            inner.next_toast_id += 1;
            inner.toasts.push(Toast {
                id,
                title: title.to_string(),
                description: description.map(str::to_string),
                level,
            });
            (id, inner.toasts.clone(), Self::listeners_of(&inner))
        };
        Self::notify(&listeners, &snapshot);

        let store = self.clone();
        let delay = self.dismiss_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.remove(id);
        });

        id
    }

    /// Remove a toast by id (no-op if absent) and notify subscribers.
    pub fn remove(&self, id: u64) {
        let (snapshot, listeners) = {
            let mut inner = self.inner.lock().unwrap();
            inner.toasts.retain(|toast| toast.id != id);
            (inner.toasts.clone(), Self::listeners_of(&inner))
        };
        Self::notify(&listeners, &snapshot);
    }

    /// Empty the list and notify subscribers.
    pub fn clear(&self) {
        let (snapshot, listeners) = {
            let mut inner = self.inner.lock().unwrap();
            inner.toasts.clear();
            (inner.toasts.clone(), Self::listeners_of(&inner))
        };
        Self::notify(&listeners, &snapshot);
    }

    /// Snapshot of the current list, for a freshly attached consumer.
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.lock().unwrap().toasts.clone()
    }

    /// Register a listener called with a snapshot after every mutation.
    ///
    /// Multiple independent subscribers are supported.
    pub fn subscribe<F>(&self, listener: F) -> ToastSubscription
    where
        F: Fn(&[Toast]) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().unwrap();
        let listener_id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((listener_id, Arc::new(listener)));
        ToastSubscription {
            inner: Arc::clone(&self.inner),
            listener_id,
        }
    }

    fn listeners_of(inner: &Inner) -> Vec<Listener> {
        inner
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    // Listeners run outside the lock so one may call back into the store.
    fn notify(listeners: &[Listener], snapshot: &[Toast]) {
        for listener in listeners {
            listener(snapshot);
        }
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ToastSubscription {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.listeners.retain(|(id, _)| *id != self.listener_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_subscriber(store: &ToastStore) -> (Arc<Mutex<Vec<Toast>>>, ToastSubscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = store.subscribe(move |toasts| {
            *sink.lock().unwrap() = toasts.to_vec();
        });
        (seen, subscription)
    }

    #[tokio::test]
    async fn test_subscribers_observe_the_store_snapshot() {
        let store = ToastStore::with_dismiss_delay(Duration::from_secs(60));
        let (seen_a, _sub_a) = recording_subscriber(&store);
        let (seen_b, _sub_b) = recording_subscriber(&store);

        let first = store.add("Round saved", None, ToastLevel::Success);
        store.add("Invite sent", Some("To kari@example.com"), ToastLevel::Info);
        store.add("Export failed", None, ToastLevel::Error);
        store.remove(first);

        let snapshot = store.toasts();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].title, "Invite sent");
        assert_eq!(snapshot[1].title, "Export failed");

        // Every subscriber saw the same final list as a fresh snapshot.
        assert_eq!(*seen_a.lock().unwrap(), snapshot);
        assert_eq!(*seen_b.lock().unwrap(), snapshot);

        store.clear();
        assert!(store.toasts().is_empty());
        assert!(seen_a.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_ordered() {
        let store = ToastStore::with_dismiss_delay(Duration::from_secs(60));
        let a = store.add("one", None, ToastLevel::Info);
        let b = store.add("two", None, ToastLevel::Info);
        assert!(b > a);

        // Removing an unknown id is a no-op, not an error.
        store.remove(9999);
        assert_eq!(store.toasts().len(), 2);
    }

    #[tokio::test]
    async fn test_toast_expires_after_the_dismiss_delay() {
        let store = ToastStore::with_dismiss_delay(Duration::from_millis(20));
        store.add("short lived", None, ToastLevel::Warning);
        assert_eq!(store.toasts().len(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(store.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_dropped_subscription_stops_notifications() {
        let store = ToastStore::with_dismiss_delay(Duration::from_secs(60));
        let (seen, subscription) = recording_subscriber(&store);

        store.add("while subscribed", None, ToastLevel::Info);
        assert_eq!(seen.lock().unwrap().len(), 1);

        drop(subscription);
        store.add("after drop", None, ToastLevel::Info);

        // The dropped guard no longer receives snapshots.
        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(store.toasts().len(), 2);
    }
}
