//! One-shot visibility trigger.
//!
//! A [`VisibilityActivator`] watches one widget's bounds against the viewport
//! and reports the first check on which enough of the widget is on screen.
//! After that it stops observing: scrolling away and back never re-triggers.
//! Construction never checks, so a widget that is already on screen at mount
//! triggers on the first frame after mount.

use crate::geometry::Rect;

/// Fraction of the widget area that must be visible by default.
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.1;

/// Observation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverState {
    /// Waiting for the widget to scroll into view.
    Observing,
    /// Fired; observation has ended.
    Triggered,
    /// Owner unmounted before the trigger fired.
    Disconnected,
}

/// Fires once, the first time a widget is sufficiently visible.
#[derive(Debug, Clone)]
pub struct VisibilityActivator {
    threshold: f32,
    state: ObserverState,
}

impl Default for VisibilityActivator {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

impl VisibilityActivator {
    /// Create an activator with a visible-area threshold in `(0, 1]`.
    /// Out-of-range thresholds are clamped into that interval.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        let threshold = if threshold.is_nan() {
            DEFAULT_VISIBILITY_THRESHOLD
        } else {
            threshold.clamp(f32::EPSILON, 1.0)
        };
        Self {
            threshold,
            state: ObserverState::Observing,
        }
    }

    /// Check visibility for this frame. Returns `true` exactly once.
    pub fn check(&mut self, bounds: Rect, viewport: Rect) -> bool {
        if self.state != ObserverState::Observing {
            return false;
        }
        let visible = bounds.visible_fraction(&viewport);
        if visible > 0.0 && visible >= self.threshold {
            self.state = ObserverState::Triggered;
            true
        } else {
            false
        }
    }

    /// Stop observing without triggering.
    pub fn disconnect(&mut self) {
        if self.state == ObserverState::Observing {
            self.state = ObserverState::Disconnected;
        }
    }

    /// Configured threshold.
    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ObserverState {
        self.state
    }

    /// Whether the trigger has fired.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.state == ObserverState::Triggered
    }
}
