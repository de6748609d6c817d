use chrono::{DateTime, Utc};

/// Read-only rollup a list screen renders from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaginationView {
    pub item_count: usize,
    pub page_count: usize,
    pub cached_since: Option<DateTime<Utc>>,
    pub failure_message: Option<String>,
    pub has_next_page: bool,
    pub is_loading_next_page: bool,
}
