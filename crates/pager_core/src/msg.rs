use crate::process::ProcessMsg;
use crate::{Page, WaiterId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg<I, T> {
    /// Point the paginator at a (possibly new) first page.
    SetFirstInput(I),
    /// View appeared; load page one unless items are already present.
    LoadFirstPageIfNeeded,
    /// Load the page after the last merged one.
    LoadNextPage { waiter: Option<WaiterId> },
    /// Drop accumulated pages and load page one again.
    Reload { waiter: Option<WaiterId> },
    /// Page loading slot traffic, including completions from the interpreter.
    PageLoading(ProcessMsg<I, Page<I, T>>),
    /// Owner is going away; cancel work and settle waiters.
    Dispose,
}

impl<I, T> Msg<I, T> {
    pub fn load_next_page() -> Self {
        Msg::LoadNextPage { waiter: None }
    }

    pub fn reload() -> Self {
        Msg::Reload { waiter: None }
    }
}
