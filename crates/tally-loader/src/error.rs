//! Load error types.

use thiserror::Error;

/// Why a remote content request produced no usable data.
///
/// Every variant is recovered by the loader; none reaches the widget layer
/// as anything but a message string.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Connection or protocol failure
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// No response within the request timeout
    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout {
        /// Requested URL
        url: String,
        /// Configured timeout
        timeout_ms: u64,
    },

    /// Non-success HTTP status
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// Status code
        status: u16,
    },

    /// Body was not the expected JSON shape
    #[error("malformed response from {url}: {source}")]
    Decode {
        /// Requested URL
        url: String,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Envelope carried `success: false`
    #[error("{url} rejected the request: {message}")]
    Rejected {
        /// Requested URL
        url: String,
        /// Server-provided reason
        message: String,
    },
}

impl LoadError {
    /// Whether the failure happened before a response was read.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Timeout { .. } | Self::Status { .. }
        )
    }
}
