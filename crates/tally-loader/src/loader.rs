//! Fetch-with-fallback loader.
//!
//! A load starts optimistic: `data` is the fallback, `loading` is true and
//! there is no error. One request is issued. Live data replaces the fallback
//! only when the response is well-formed and non-empty; an empty response
//! keeps the fallback silently; any failure keeps the fallback and records a
//! message. `loading` always ends false.

use crate::result::FetchResult;
use crate::source::ContentSource;
use serde::Serialize;
use std::sync::Arc;
use tally_core::CancelToken;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What the widget layer sees of a load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadState<T> {
    /// Records to display; never empty unless the fallback is
    pub data: Vec<T>,
    /// Whether the request is still in flight
    pub loading: bool,
    /// Failure message, `None` for success and for empty-but-valid
    pub error: Option<String>,
}

impl<T> LoadState<T> {
    /// Whether the fallback is shown because the request failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Loads record lists from a [`ContentSource`], substituting an immutable
/// fallback dataset when the source fails or has nothing.
pub struct Loader<T> {
    source: Arc<dyn ContentSource<T>>,
    fallback: Arc<[T]>,
}

impl<T> Clone for Loader<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            fallback: Arc::clone(&self.fallback),
        }
    }
}

impl<T> std::fmt::Debug for Loader<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("fallback_len", &self.fallback.len())
            .finish_non_exhaustive()
    }
}

impl<T> Loader<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Loader over `source` with `fallback` injected at construction.
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource<T>>, fallback: impl Into<Arc<[T]>>) -> Self {
        Self {
            source,
            fallback: fallback.into(),
        }
    }

    /// The fallback dataset.
    #[must_use]
    pub fn fallback(&self) -> &[T] {
        &self.fallback
    }

    /// State before the request resolves.
    #[must_use]
    pub fn initial_state(&self) -> LoadState<T> {
        LoadState {
            data: self.fallback.to_vec(),
            loading: true,
            error: None,
        }
    }

    /// Issue one request and resolve it against the fallback.
    pub async fn load(&self, endpoint: &str) -> LoadState<T> {
        let result = self.source.fetch(endpoint).await;
        self.resolve(endpoint, result)
    }

    /// Fold a fetch outcome into a terminal state.
    #[must_use]
    pub fn resolve(&self, endpoint: &str, result: FetchResult<T>) -> LoadState<T> {
        if !result.success {
            let message = result
                .error_message
                .unwrap_or_else(|| "content request failed".to_string());
            warn!(endpoint, error = %message, "content load failed; showing fallback");
            return self.fallback_state(Some(message));
        }

        match result.data {
            Some(data) if !data.is_empty() => {
                info!(endpoint, count = data.len(), "content loaded");
                LoadState {
                    data,
                    loading: false,
                    error: None,
                }
            }
            _ => {
                debug!(endpoint, "no content configured; showing fallback");
                self.fallback_state(None)
            }
        }
    }

    /// Run [`Loader::load`] on the tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn spawn(&self, endpoint: impl Into<String>) -> LoadHandle<T> {
        let endpoint = endpoint.into();
        let (tx, rx) = watch::channel(self.initial_state());
        let cancel = CancelToken::new();

        // The guard lives in the future so an abort before the first poll
        // still clears `loading`.
        let guard = LoadingGuard { tx };
        let task = tokio::spawn({
            let loader = self.clone();
            let cancel = cancel.clone();
            async move {
                let state = loader.load(&endpoint).await;
                if cancel.is_cancelled() {
                    debug!(endpoint = %endpoint, "load cancelled; dropping late result");
                    return;
                }
                guard.publish(state);
            }
        });

        LoadHandle {
            rx,
            cancel,
            task,
            terminal_seen: false,
        }
    }

    fn fallback_state(&self, error: Option<String>) -> LoadState<T> {
        LoadState {
            data: self.fallback.to_vec(),
            loading: false,
            error,
        }
    }
}

/// Clears `loading` however the load task ends: completion, early return,
/// or abort.
struct LoadingGuard<T> {
    tx: watch::Sender<LoadState<T>>,
}

impl<T> LoadingGuard<T> {
    fn publish(&self, state: LoadState<T>) {
        self.tx.send_replace(state);
    }
}

impl<T> Drop for LoadingGuard<T> {
    fn drop(&mut self) {
        self.tx.send_if_modified(|state| {
            let was_loading = state.loading;
            state.loading = false;
            was_loading
        });
    }
}

/// Handle to a spawned load. Dropping it cancels the load.
#[derive(Debug)]
pub struct LoadHandle<T> {
    rx: watch::Receiver<LoadState<T>>,
    cancel: CancelToken,
    task: JoinHandle<()>,
    terminal_seen: bool,
}

impl<T: Clone> LoadHandle<T> {
    /// Snapshot of the latest state.
    #[must_use]
    pub fn state(&self) -> LoadState<T> {
        self.rx.borrow().clone()
    }

    /// Whether the request is still in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.rx.borrow().loading
    }

    /// The state, if it changed since the last call.
    ///
    /// The terminal state is reported exactly once, including when the load
    /// task has already finished and closed the channel.
    pub fn take_update(&mut self) -> Option<LoadState<T>> {
        let state = match self.rx.has_changed() {
            Ok(true) => self.rx.borrow_and_update().clone(),
            Ok(false) => return None,
            // Closed: the guard has published the last value and gone.
            Err(_) if self.terminal_seen => return None,
            Err(_) => {
                let mut state = self.rx.borrow_and_update().clone();
                state.loading = false;
                state
            }
        };
        if !state.loading {
            self.terminal_seen = true;
        }
        Some(state)
    }

    /// Wait until loading ends and return the terminal state.
    pub async fn finished(&mut self) -> LoadState<T> {
        self.terminal_seen = true;
        if let Ok(state) = self.rx.wait_for(|state| !state.loading).await {
            return state.clone();
        }
        let mut state = self.rx.borrow_and_update().clone();
        state.loading = false;
        state
    }
}

impl<T> LoadHandle<T> {
    /// Stop the load. Results arriving afterwards are discarded.
    pub fn cancel(&self) {
        self.cancel.cancel();
        self.task.abort();
    }

    /// Whether [`LoadHandle::cancel`] was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl<T> Drop for LoadHandle<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
