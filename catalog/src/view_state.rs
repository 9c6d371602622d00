//! The per-view state machine published to the presentation layer.

use crate::youtube_api::{FetchError, FetchErrorKind};
use std::fmt;

/// What went wrong, as far as a view is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    HttpStatus,
    Decode,
    /// A lookup by id came back empty.
    NotFound,
}

impl From<FetchErrorKind> for ErrorKind {
    fn from(kind: FetchErrorKind) -> Self {
        match kind {
            FetchErrorKind::Network => ErrorKind::Network,
            FetchErrorKind::HttpStatus => ErrorKind::HttpStatus,
            FetchErrorKind::Decode => ErrorKind::Decode,
        }
    }
}

/// An error ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ViewError {
    pub fn not_found(what: &str, id: &str) -> Self {
        Self {
            kind: ErrorKind::NotFound,
            message: format!("{what} not found: {id}"),
        }
    }
}

impl From<FetchError> for ViewError {
    fn from(e: FetchError) -> Self {
        let message = match (e.kind, e.status) {
            (FetchErrorKind::Network, _) => {
                format!("Could not reach YouTube ({})", e.detail)
            }
            (FetchErrorKind::HttpStatus, Some(status)) => {
                format!("YouTube rejected the request ({status}): {}", e.detail)
            }
            (FetchErrorKind::HttpStatus, None) => {
                format!("YouTube rejected the request: {}", e.detail)
            }
            (FetchErrorKind::Decode, _) => {
                format!("YouTube sent an unexpected response ({})", e.detail)
            }
        };
        Self {
            kind: e.kind.into(),
            message,
        }
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ViewError {}

/// The lifecycle of one view slot.
///
/// ```text
/// Idle ──trigger──▶ Loading ──▶ Ready(T) | Error
///                      ▲              │
///                      └───trigger────┘
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState<T> {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// `true` once the slot is `Ready` or `Error`.
    pub fn is_settled(&self) -> bool {
        matches!(self, ViewState::Ready(_) | ViewState::Error(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            ViewState::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl<T> From<Result<T, ViewError>> for ViewState<T> {
    fn from(result: Result<T, ViewError>) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => ViewState::Error(e),
        }
    }
}

impl<T> From<Result<T, FetchError>> for ViewState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        result.map_err(ViewError::from).into()
    }
}
