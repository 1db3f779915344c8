//! Core types for Tally counter widgets.
//!
//! This crate holds the synchronous, deterministic parts of the counter
//! display system:
//! - Data model: [`CounterSpec`], [`CounterRecord`], [`Icon`]
//! - Animation: [`Easing`], [`CountUp`]
//! - Activation: [`VisibilityActivator`], [`assign_delays`]
//! - Presentation helpers: [`format_count`], [`Color`], [`Canvas`]
//!
//! Nothing here owns a timer or a network connection; callers feed frame
//! timestamps and viewport rectangles in.

mod cancel;
mod canvas;
mod color;
mod count_up;
mod counter;
mod easing;
mod error;
mod format;
mod geometry;
mod stagger;
mod visibility;

pub use cancel::CancelToken;
pub use canvas::{Canvas, DrawCommand, FontWeight, RecordingCanvas, TextAlign, TextStyle};
pub use color::{Color, ColorParseError};
pub use count_up::{CountUp, CountUpPhase, DEFAULT_DURATION_MS};
pub use counter::{CounterId, CounterRecord, CounterSpec, Icon, IconKind};
pub use easing::Easing;
pub use error::CoreError;
pub use format::{format_count, format_with_suffix, Locale};
pub use geometry::{Point, Rect};
pub use stagger::{assign_delays, stagger_delay, DEFAULT_STAGGER_MS};
pub use visibility::{ObserverState, VisibilityActivator, DEFAULT_VISIBILITY_THRESHOLD};
