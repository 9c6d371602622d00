//! Failure taxonomy for calls against the YouTube Data API.

use std::fmt;
use thiserror::Error;

/// Which stage of a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// The request never produced a response (DNS, connect, TLS, reset, ...).
    Network,
    /// The API answered with a non-success status code.
    HttpStatus,
    /// The response body was not JSON, or not the shape we expected.
    Decode,
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchErrorKind::Network => f.write_str("network"),
            FetchErrorKind::HttpStatus => f.write_str("http status"),
            FetchErrorKind::Decode => f.write_str("decode"),
        }
    }
}

/// A failed `fetch_resource` call.
///
/// Every failure below the client boundary is folded into one of the three
/// [`FetchErrorKind`]s; the transport error itself is only kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {detail}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    /// HTTP status code, only set for [`FetchErrorKind::HttpStatus`].
    pub status: Option<u16>,
    pub detail: String,
}

impl FetchError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Network,
            status: None,
            detail: detail.into(),
        }
    }

    pub fn http_status(status: u16, detail: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::HttpStatus,
            status: Some(status),
            detail: detail.into(),
        }
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Decode,
            status: None,
            detail: detail.into(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::decode(e.to_string())
    }
}

/// The error envelope the API wraps around non-success responses.
///
/// See: <https://developers.google.com/youtube/v3/docs/errors>
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let e = FetchError::http_status(403, "quota exceeded");
        assert_eq!(e.to_string(), "http status error: quota exceeded");
        assert_eq!(e.status, Some(403));

        let e = FetchError::network("connection reset");
        assert_eq!(e.to_string(), "network error: connection reset");
        assert_eq!(e.status, None);
    }

    #[test]
    fn serde_errors_become_decode_errors() {
        let err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let e = FetchError::from(err);
        assert_eq!(e.kind, FetchErrorKind::Decode);
    }
}
