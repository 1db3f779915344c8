//! A single animated counter.

use crate::variant::{render_with, CardStyle, CounterView, Variant};
use tally_core::{Canvas, CountUp, CounterSpec, Easing, Locale, Rect, VisibilityActivator};
use tracing::debug;

/// One counter: its record, engine, visibility trigger and placement.
///
/// The engine stays idle until the activator fires; the stagger delay is
/// counted from that moment, not from mount.
#[derive(Debug, Clone)]
pub struct CounterWidget {
    spec: CounterSpec,
    engine: CountUp,
    activator: VisibilityActivator,
    delay_ms: u64,
    bounds: Rect,
}

impl CounterWidget {
    /// Create a widget. `default_duration_ms` applies when the record has no
    /// duration of its own.
    #[must_use]
    pub fn new(
        spec: CounterSpec,
        delay_ms: u64,
        default_duration_ms: u64,
        easing: Easing,
        visibility_threshold: f32,
    ) -> Self {
        let engine = CountUp::new(
            spec.target_value(),
            spec.duration_or(default_duration_ms),
            easing,
        );
        Self {
            spec,
            engine,
            activator: VisibilityActivator::new(visibility_threshold),
            delay_ms,
            bounds: Rect::default(),
        }
    }

    /// Place the widget.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Move the widget.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Advance one frame. Returns a newly displayed value, if any.
    pub fn frame(&mut self, now_ms: u64, viewport: Rect) -> Option<u64> {
        if self.activator.check(self.bounds, viewport) {
            debug!(
                id = %self.spec.id(),
                delay_ms = self.delay_ms,
                "counter visible; scheduling count-up"
            );
            self.engine.start_at(now_ms.saturating_add(self.delay_ms));
        }
        self.engine.frame(now_ms)
    }

    /// Stop animating and observing. Idempotent.
    pub fn unmount(&mut self) {
        self.engine.cancel();
        self.activator.disconnect();
    }

    /// The record.
    #[must_use]
    pub const fn spec(&self) -> &CounterSpec {
        &self.spec
    }

    /// Value on screen.
    #[must_use]
    pub const fn displayed(&self) -> u64 {
        self.engine.value()
    }

    /// Stagger delay applied after the trigger.
    #[must_use]
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Placement.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The engine.
    #[must_use]
    pub const fn engine(&self) -> &CountUp {
        &self.engine
    }

    /// Whether the visibility trigger has fired.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.activator.is_triggered()
    }

    /// Whether an animation is scheduled or running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.engine.is_pending()
    }

    /// Current view.
    #[must_use]
    pub fn view(&self, variant: Variant, locale: Locale) -> CounterView {
        render_with(&self.spec, self.displayed(), variant, locale)
    }

    /// Paint at the widget's bounds.
    pub fn paint(&self, variant: Variant, style: CardStyle, locale: Locale, canvas: &mut dyn Canvas) {
        self.view(variant, locale).paint(self.bounds, style, canvas);
    }
}
