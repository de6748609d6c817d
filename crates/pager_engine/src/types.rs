use std::fmt;

use pager_core::WaiterRejection;
use thiserror::Error;

/// A failed request, collapsed to a kind plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "response decoding failed"),
        }
    }
}

/// Why a page waiter did not receive a page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageLoadError {
    #[error("page load failed: {0}")]
    Failed(String),
    #[error("page load cancelled")]
    Cancelled,
    #[error("no next page to load")]
    Exhausted,
}

impl From<WaiterRejection> for PageLoadError {
    fn from(rejection: WaiterRejection) -> Self {
        match rejection {
            WaiterRejection::Failed(message) => PageLoadError::Failed(message),
            WaiterRejection::Cancelled => PageLoadError::Cancelled,
            WaiterRejection::Exhausted => PageLoadError::Exhausted,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to spawn paginator thread: {0}")]
    Thread(#[source] std::io::Error),
}
