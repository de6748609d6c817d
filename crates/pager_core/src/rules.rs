use std::fmt;
use std::sync::Arc;

use crate::Page;

type NextInputOf<I, T> = Arc<dyn Fn(&Page<I, T>) -> Option<I> + Send + Sync>;
type IsFirstPage<I, T> = Arc<dyn Fn(&Page<I, T>) -> bool + Send + Sync>;

/// How a paginator walks from one page to the next.
///
/// Fixed for the lifetime of a paginator and passed to every [`crate::update`].
pub struct PageRules<I, T> {
    next_input_of: NextInputOf<I, T>,
    is_first_page: IsFirstPage<I, T>,
}

impl<I, T> PageRules<I, T> {
    pub fn new(
        next_input_of: impl Fn(&Page<I, T>) -> Option<I> + Send + Sync + 'static,
        is_first_page: impl Fn(&Page<I, T>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            next_input_of: Arc::new(next_input_of),
            is_first_page: Arc::new(is_first_page),
        }
    }

    /// Follows `info.next` and treats a page without `info.prev` as page one.
    pub fn follow_links() -> Self
    where
        I: Clone + 'static,
        T: 'static,
    {
        Self::new(
            |page: &Page<I, T>| page.info.next.clone(),
            |page: &Page<I, T>| page.info.prev.is_none(),
        )
    }

    pub fn next_input_of(&self, page: &Page<I, T>) -> Option<I> {
        (self.next_input_of)(page)
    }

    pub fn is_first_page(&self, page: &Page<I, T>) -> bool {
        (self.is_first_page)(page)
    }
}

impl<I, T> Clone for PageRules<I, T> {
    fn clone(&self) -> Self {
        Self {
            next_input_of: Arc::clone(&self.next_input_of),
            is_first_page: Arc::clone(&self.is_first_page),
        }
    }
}

impl<I, T> fmt::Debug for PageRules<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRules").finish_non_exhaustive()
    }
}
