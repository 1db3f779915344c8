//! Eased count-up engine.
//!
//! A [`CountUp`] turns a target integer, a duration and an [`Easing`] into a
//! sequence of displayed integers, one sample per animation frame. The engine
//! owns no timer: the caller feeds it frame timestamps, which keeps it
//! deterministic under a manual clock.
//!
//! Guarantees, for every target and easing:
//! - emitted values are integers in `[0, target]` and never decrease,
//! - intermediate values are truncated (`floor`), never rounded,
//! - the last emitted value of a completed run is exactly `target`.

use crate::easing::Easing;

/// Duration used when a counter does not configure one.
pub const DEFAULT_DURATION_MS: u64 = 2000;

/// Lifecycle of one count-up run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountUpPhase {
    /// Not started; displays 0.
    Idle,
    /// Start requested for a future timestamp (stagger delay pending).
    Scheduled {
        /// Timestamp (ms) at which counting begins.
        start_at: u64,
    },
    /// Counting.
    Running {
        /// Timestamp (ms) counting began.
        started_at: u64,
    },
    /// Reached the target.
    Complete,
    /// Stopped by its owner; no further values are emitted.
    Cancelled,
}

/// Eased count-up engine for one displayed metric.
#[derive(Debug, Clone)]
pub struct CountUp {
    target: u64,
    duration_ms: u64,
    easing: Easing,
    phase: CountUpPhase,
    value: u64,
    last_emitted: Option<u64>,
}

impl CountUp {
    /// Create an engine. A zero duration is a caller bug: it asserts in debug
    /// builds and is treated as 1 ms otherwise.
    #[must_use]
    pub fn new(target: u64, duration_ms: u64, easing: Easing) -> Self {
        debug_assert!(duration_ms > 0, "count-up duration must be positive");
        Self {
            target,
            duration_ms: duration_ms.max(1),
            easing,
            phase: CountUpPhase::Idle,
            value: 0,
            last_emitted: None,
        }
    }

    /// Start counting at `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.start_at(now_ms);
    }

    /// Start counting at a future timestamp. Only an idle engine can be started;
    /// later calls are ignored so a start can never rewind a running count.
    pub fn start_at(&mut self, start_ms: u64) {
        if self.phase == CountUpPhase::Idle {
            self.phase = CountUpPhase::Scheduled { start_at: start_ms };
        }
    }

    /// Stop emitting. The displayed value freezes where it is.
    pub fn cancel(&mut self) {
        if !matches!(self.phase, CountUpPhase::Complete) {
            self.phase = CountUpPhase::Cancelled;
        }
    }

    /// Sample the animation at frame timestamp `now_ms`.
    ///
    /// Returns the value to display if it changed since the last emission.
    /// At most one value is produced per call.
    pub fn frame(&mut self, now_ms: u64) -> Option<u64> {
        let started_at = match self.phase {
            CountUpPhase::Idle | CountUpPhase::Complete | CountUpPhase::Cancelled => return None,
            CountUpPhase::Scheduled { start_at } if now_ms < start_at => return None,
            CountUpPhase::Scheduled { start_at } => {
                self.phase = CountUpPhase::Running {
                    started_at: start_at,
                };
                start_at
            }
            CountUpPhase::Running { started_at } => started_at,
        };

        let elapsed = now_ms.saturating_sub(started_at);
        if elapsed >= self.duration_ms {
            self.phase = CountUpPhase::Complete;
            self.value = self.target;
            return self.emit(self.target);
        }

        let progress = elapsed as f64 / self.duration_ms as f64;
        let eased = self.easing.apply(progress);
        let sampled = (eased * self.target as f64).floor() as u64;
        self.value = sampled.min(self.target).max(self.value);
        self.emit(self.value)
    }

    /// Feed a sequence of frame timestamps, calling `on_tick` for every emitted
    /// value. Stops early once the run completes or is cancelled.
    pub fn run<I, F>(&mut self, frames: I, mut on_tick: F)
    where
        I: IntoIterator<Item = u64>,
        F: FnMut(u64),
    {
        for now in frames {
            if let Some(value) = self.frame(now) {
                on_tick(value);
            }
            if self.is_finished() {
                break;
            }
        }
    }

    fn emit(&mut self, value: u64) -> Option<u64> {
        if self.last_emitted == Some(value) {
            None
        } else {
            self.last_emitted = Some(value);
            Some(value)
        }
    }

    /// Currently displayed value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Final value.
    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }

    /// Effective duration in milliseconds.
    #[must_use]
    pub const fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Easing curve.
    #[must_use]
    pub const fn easing(&self) -> Easing {
        self.easing
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> CountUpPhase {
        self.phase
    }

    /// Timestamp counting began, while running.
    #[must_use]
    pub const fn started_at(&self) -> Option<u64> {
        match self.phase {
            CountUpPhase::Running { started_at } => Some(started_at),
            _ => None,
        }
    }

    /// Whether the target has been reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == CountUpPhase::Complete
    }

    /// Whether frames can still change the displayed value.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(
            self.phase,
            CountUpPhase::Scheduled { .. } | CountUpPhase::Running { .. }
        )
    }

    /// Complete or cancelled.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, CountUpPhase::Complete | CountUpPhase::Cancelled)
    }
}
