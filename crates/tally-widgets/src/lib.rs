//! Animated counter widgets for Tally.
//!
//! - [`CounterSection`]: the mountable section; loads, lays out and staggers
//!   its counters
//! - [`CounterWidget`]: one counter with its engine and visibility trigger
//! - [`render`] / [`CounterView`]: pure display variant mapping
//! - [`drive`]: feeds frames from a [`FrameScheduler`]
//!
//! # Example
//!
//! ```
//! use tally_core::{CounterSpec, Rect};
//! use tally_widgets::{CounterSection, SectionConfig};
//!
//! let mut section = CounterSection::mount_static(
//!     SectionConfig::titled("Our impact"),
//!     Rect::new(0.0, 0.0, 1080.0, 400.0),
//!     vec![CounterSpec::new(1u64, "Happy Seniors", 1200).with_suffix("+")],
//! );
//! let viewport = Rect::new(0.0, 0.0, 1280.0, 720.0);
//! for now in (0..=3_000).step_by(16) {
//!     section.frame(now, viewport);
//! }
//! assert_eq!(section.displayed(), vec![1200]);
//! ```

mod counter_widget;
mod driver;
mod layout;
mod section;
mod variant;

pub use counter_widget::CounterWidget;
pub use driver::{
    drive, drive_until, drive_with, DriveReport, FrameScheduler, IntervalScheduler,
    ManualScheduler, StopWhen, DEFAULT_FPS,
};
pub use layout::{SectionLayout, DEFAULT_GRID_COLUMNS, DEFAULT_ITEM_HEIGHT, GAP};
pub use section::{prepare_batch, CounterSection, SectionConfig};
pub use variant::{
    circular_progress, render, render_with, CardStyle, CounterView, UnknownName, Variant,
    CIRCULAR_PROGRESS_FLOOR,
};
