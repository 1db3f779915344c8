//! Shared cancellation flag.
//!
//! Owners of in-flight work (a fetch, an animation loop) keep one clone and
//! check it before applying results; the widget being torn down flips another.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable one-way cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark as cancelled. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether `cancel` has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
