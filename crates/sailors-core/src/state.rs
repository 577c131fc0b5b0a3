//! ============================================================================
//! View State - Explicit state container with change notification
//! ============================================================================
//! Screens hold the last good result of a fetch cycle in a [`StateStore`]
//! and subscribe to a `tokio::sync::watch` channel for updates.
//!
//! A failed refresh never clears data: the previous value stays in place
//! and only `last_error` changes.
//! ============================================================================

use serde::Serialize;
use tokio::sync::watch;
use tracing::warn;

use crate::error::{Result, SailorsError};

/// Snapshot published to subscribers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState<T> {
    pub data: T,
    /// Error from the most recent refresh, cleared on success
    pub last_error: Option<SailorsError>,
    /// Bumped on every successful refresh
    pub revision: u64,
}

/// Owner of one screen's state
pub struct StateStore<T> {
    tx: watch::Sender<ViewState<T>>,
}

impl<T: Clone> StateStore<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(ViewState {
            data: initial,
            last_error: None,
            revision: 0,
        });
        Self { tx }
    }

    /// Receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.tx.subscribe()
    }

    /// Clone of the current snapshot
    pub fn snapshot(&self) -> ViewState<T> {
        self.tx.borrow().clone()
    }

    /// Clone of the current data
    pub fn data(&self) -> T {
        self.tx.borrow().data.clone()
    }

    /// Publish the outcome of a refresh. Success replaces the data; failure
    /// keeps it and records the error. The outcome is handed back.
    pub fn apply(&self, outcome: Result<T>) -> Result<()> {
        match outcome {
            Ok(data) => {
                self.tx.send_modify(|state| {
                    state.data = data;
                    state.last_error = None;
                    state.revision += 1;
                });
                Ok(())
            }
            Err(e) => {
                warn!("Refresh failed, keeping previous state: {}", e);
                self.tx.send_modify(|state| {
                    state.last_error = Some(e.clone());
                });
                Err(e)
            }
        }
    }
}

impl<T: Clone + Default> Default for StateStore<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_replaces_data() {
        let store = StateStore::new(vec![1]);
        store.apply(Ok(vec![2, 3])).unwrap();

        let snap = store.snapshot();
        assert_eq!(snap.data, vec![2, 3]);
        assert_eq!(snap.revision, 1);
        assert!(snap.last_error.is_none());
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let store = StateStore::new(Vec::<i32>::new());
        store.apply(Ok(vec![7])).unwrap();

        let err = store
            .apply(Err(SailorsError::Network("timeout".into())))
            .unwrap_err();
        assert!(err.is_network());

        let snap = store.snapshot();
        assert_eq!(snap.data, vec![7]);
        assert_eq!(snap.revision, 1);
        assert_eq!(snap.last_error, Some(SailorsError::Network("timeout".into())));

        store.apply(Ok(vec![8])).unwrap();
        assert!(store.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn test_subscribers_notified() {
        let store: StateStore<Vec<i32>> = StateStore::default();
        let mut rx = store.subscribe();

        store.apply(Ok(vec![1])).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().data, vec![1]);

        let _ = store.apply(Err(SailorsError::Decode("bad".into())));
        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.data, vec![1]);
        assert!(seen.last_error.unwrap().is_decode());
    }
}
