//! Fetch-with-fallback content loading for Tally.
//!
//! A [`Loader`] pairs a [`ContentSource`] with an immutable fallback dataset
//! and always yields something displayable:
//!
//! | outcome | `data` | `error` |
//! |---------|--------|---------|
//! | non-empty response | live records | `None` |
//! | empty response | fallback | `None` |
//! | transport or shape failure | fallback | message |
//!
//! [`HttpSource`] accepts both bare JSON arrays and `{success, data}`
//! envelopes.

mod content;
mod error;
mod fallback;
mod loader;
mod result;
mod source;

pub use content::{default_blogs, default_features, default_slides, BlogPost, Feature, Slide};
pub use error::LoadError;
pub use fallback::default_counters;
pub use loader::{LoadHandle, LoadState, Loader};
pub use result::FetchResult;
pub use source::{ContentSource, HttpSource, StaticSource, DEFAULT_TIMEOUT};
