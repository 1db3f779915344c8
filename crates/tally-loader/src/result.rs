//! Outcome of one remote call and the response shapes it is decoded from.

use crate::error::LoadError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Transient result of a single fetch, consumed once by the loader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchResult<T> {
    /// Whether the call produced a well-formed response
    pub success: bool,
    /// Decoded records; `None` when the server sent `data: null`
    pub data: Option<Vec<T>>,
    /// Human-readable failure description
    pub error_message: Option<String>,
}

impl<T> FetchResult<T> {
    /// Successful call carrying records.
    #[must_use]
    pub const fn ok(data: Vec<T>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error_message: None,
        }
    }

    /// Successful call with nothing configured.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error_message: None,
        }
    }

    /// Failed call.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error_message: Some(message.into()),
        }
    }

    /// Records, if the call succeeded with a non-empty list.
    #[must_use]
    pub fn records(&self) -> Option<&[T]> {
        match &self.data {
            Some(data) if self.success && !data.is_empty() => Some(data),
            _ => None,
        }
    }
}

impl<T> From<Result<Option<Vec<T>>, LoadError>> for FetchResult<T> {
    fn from(result: Result<Option<Vec<T>>, LoadError>) -> Self {
        match result {
            Ok(Some(data)) => Self::ok(data),
            Ok(None) => Self::empty(),
            Err(err) => Self::failed(err.to_string()),
        }
    }
}

/// `{success, data, message}` wrapper some endpoints use.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<Vec<T>>,
    message: Option<String>,
}

/// Decode a response body that is either a bare array or an envelope.
pub(crate) fn decode_body<T: DeserializeOwned>(
    url: &str,
    body: &str,
) -> Result<Option<Vec<T>>, LoadError> {
    let decode_err = |source| LoadError::Decode {
        url: url.to_string(),
        source,
    };

    let value: serde_json::Value = serde_json::from_str(body).map_err(decode_err)?;
    if value.is_array() {
        return serde_json::from_value(value).map(Some).map_err(decode_err);
    }

    let envelope: Envelope<T> = serde_json::from_value(value).map_err(decode_err)?;
    if envelope.success {
        Ok(envelope.data)
    } else {
        Err(LoadError::Rejected {
            url: url.to_string(),
            message: envelope
                .message
                .unwrap_or_else(|| "no message given".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    #[test]
    fn test_bare_array() {
        let rows: Option<Vec<Row>> = decode_body("u", r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(rows.map(|r| r.len()), Some(2));
    }

    #[test]
    fn test_envelope() {
        let rows: Option<Vec<Row>> =
            decode_body("u", r#"{"success": true, "data": [{"id": 7}]}"#).unwrap();
        assert_eq!(rows, Some(vec![Row { id: 7 }]));

        let rows: Option<Vec<Row>> =
            decode_body("u", r#"{"success": true, "data": null}"#).unwrap();
        assert_eq!(rows, None);
    }

    #[test]
    fn test_envelope_rejected() {
        let err = decode_body::<Row>("u", r#"{"success": false, "message": "nope"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Rejected { ref message, .. } if message == "nope"));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            decode_body::<Row>("u", "<html>"),
            Err(LoadError::Decode { .. })
        ));
        assert!(matches!(
            decode_body::<Row>("u", r#"[{"id": "x"}]"#),
            Err(LoadError::Decode { .. })
        ));
        assert!(matches!(
            decode_body::<Row>("u", "42"),
            Err(LoadError::Decode { .. })
        ));
    }

    #[test]
    fn test_fetch_result_records() {
        assert_eq!(FetchResult::ok(vec![1, 2]).records(), Some(&[1, 2][..]));
        assert_eq!(FetchResult::<u8>::ok(vec![]).records(), None);
        assert_eq!(FetchResult::<u8>::empty().records(), None);
        assert_eq!(FetchResult::<u8>::failed("x").records(), None);
    }
}
