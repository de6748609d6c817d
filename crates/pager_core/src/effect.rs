use std::fmt;

use crate::process::{ProcessEffect, RequestId};
use crate::Page;

/// Caller-supplied token naming one waiter for the next page result.
///
/// The interpreter allocates ids and keeps the actual completion handles;
/// the state machine only tracks which ids are pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaiterId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<I, T> {
    FetchPage {
        request: RequestId,
        input: I,
    },
    CancelFetch {
        request: RequestId,
    },
    ResolveWaiters {
        waiters: Vec<WaiterId>,
        page: Page<I, T>,
    },
    RejectWaiters {
        waiters: Vec<WaiterId>,
        rejection: WaiterRejection,
    },
}

impl<I, T> From<ProcessEffect<I>> for Effect<I, T> {
    fn from(effect: ProcessEffect<I>) -> Self {
        match effect {
            ProcessEffect::Run { request, input } => Effect::FetchPage { request, input },
            ProcessEffect::Cancel { request } => Effect::CancelFetch { request },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaiterRejection {
    /// The page fetch failed with this message.
    Failed(String),
    /// The paginator was torn down before a page arrived.
    Cancelled,
    /// There was no next page to load.
    Exhausted,
}

impl fmt::Display for WaiterRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaiterRejection::Failed(message) => write!(f, "page load failed: {message}"),
            WaiterRejection::Cancelled => write!(f, "page load cancelled"),
            WaiterRejection::Exhausted => write!(f, "no next page"),
        }
    }
}
