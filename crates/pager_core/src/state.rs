use chrono::{DateTime, Utc};
use pager_logging::pager_debug;

use crate::process::ProcessHost;
use crate::view_model::PaginationView;
use crate::{Identified, IdentifiedVec, Page, PageRules, WaiterId};

pub type PageLoading<I, T> = ProcessHost<I, Page<I, T>>;

/// Accumulated state of one continuously paginated list.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState<I, T: Identified> {
    first_input: Option<I>,
    items: IdentifiedVec<T>,
    pages: Vec<Page<I, T>>,
    next_input: Option<I>,
    page_loading: PageLoading<I, T>,
    pending_waiters: Vec<WaiterId>,
}

impl<I: Clone, T: Identified> PaginationState<I, T> {
    /// Fresh state; `None` means there is no data source yet.
    pub fn new(first_input: Option<I>) -> Self {
        Self {
            next_input: first_input.clone(),
            first_input,
            items: IdentifiedVec::new(),
            pages: Vec::new(),
            page_loading: ProcessHost::default(),
            pending_waiters: Vec::new(),
        }
    }

    /// Rebuilds state from previously fetched pages, in fetch order.
    pub fn from_cache(first_input: I, pages: Vec<Page<I, T>>, rules: &PageRules<I, T>) -> Self
    where
        T: Clone,
    {
        let next_input = match pages.last() {
            Some(last) => rules.next_input_of(last),
            None => Some(first_input.clone()),
        };
        let items = pages
            .iter()
            .flat_map(|page| page.results.iter().cloned())
            .collect();
        Self {
            first_input: Some(first_input),
            items,
            pages,
            next_input,
            page_loading: ProcessHost::default(),
            pending_waiters: Vec::new(),
        }
    }

    pub fn first_input(&self) -> Option<&I> {
        self.first_input.as_ref()
    }

    pub fn items(&self) -> &IdentifiedVec<T> {
        &self.items
    }

    pub fn pages(&self) -> &[Page<I, T>] {
        &self.pages
    }

    pub fn next_input(&self) -> Option<&I> {
        self.next_input.as_ref()
    }

    pub fn page_loading(&self) -> &PageLoading<I, T> {
        &self.page_loading
    }

    pub fn pending_waiters(&self) -> &[WaiterId] {
        &self.pending_waiters
    }

    pub fn cached_since(&self) -> Option<DateTime<Utc>> {
        self.pages.first().and_then(|page| page.cached_since)
    }

    pub fn failure_message(&self) -> Option<&str> {
        self.page_loading.status().failure_message()
    }

    pub fn has_next_page(&self) -> bool {
        self.next_input.is_some()
    }

    pub fn is_loading_next_page(&self) -> bool {
        self.page_loading.is_processing()
    }

    pub fn needs_to_load_first_page(&self) -> bool {
        self.items.is_empty() && self.has_next_page()
    }

    pub fn view(&self) -> PaginationView {
        PaginationView {
            item_count: self.items.len(),
            page_count: self.pages.len(),
            cached_since: self.cached_since(),
            failure_message: self.failure_message().map(ToOwned::to_owned),
            has_next_page: self.has_next_page(),
            is_loading_next_page: self.is_loading_next_page(),
        }
    }

    pub(crate) fn set_first_input(&mut self, input: I) {
        self.first_input = Some(input);
    }

    pub(crate) fn page_loading_mut(&mut self) -> &mut PageLoading<I, T> {
        &mut self.page_loading
    }

    pub(crate) fn push_waiter(&mut self, waiter: WaiterId) {
        self.pending_waiters.push(waiter);
    }

    pub(crate) fn take_waiters(&mut self) -> Vec<WaiterId> {
        std::mem::take(&mut self.pending_waiters)
    }

    pub(crate) fn reset(&mut self) {
        self.items.clear();
        self.pages.clear();
        self.next_input = self.first_input.clone();
    }

    /// Appends a fetched page, restarting from scratch when it is page one.
    pub(crate) fn merge_page(&mut self, page: Page<I, T>, rules: &PageRules<I, T>)
    where
        T: Clone,
    {
        if rules.is_first_page(&page) {
            if !self.pages.is_empty() {
                pager_debug!(
                    "first page arrived with {} page(s) merged; resetting",
                    self.pages.len()
                );
            }
            self.reset();
        }
        self.items.extend(page.results.iter().cloned());
        self.next_input = rules.next_input_of(&page);
        self.pages.push(page);
    }
}
