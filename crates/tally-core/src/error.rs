//! Error type for parsing core configuration values.

use thiserror::Error;

/// Errors raised when a configuration string names something unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Easing name not in the supported set.
    #[error("unknown easing function: {0}")]
    UnknownEasing(String),

    /// Locale tag not in the supported set.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// Icon kind other than `class` or `image`.
    #[error("unknown icon kind: {0}")]
    UnknownIconKind(String),
}
