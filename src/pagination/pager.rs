//! Cursor pager over a list operation

use super::types::{ListOperation, PageRequest};
use crate::error::{Error, Result};
use futures::stream::{self, Stream};
use tracing::debug;

/// Lifecycle of a [`Pager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagerState {
    /// Nothing fetched yet
    #[default]
    Fresh,
    /// Last page carried a continuation
    HasMore,
    /// Last page had no continuation; terminal
    Exhausted,
}

/// Walks a cursor-paginated listing one page at a time.
///
/// Each [`get_next`](Pager::get_next) issues exactly one call to the wrapped
/// operation, with the cursor from the previous page written into the
/// request. The pager stops when a page comes back without a continuation;
/// `total_count` is never consulted.
///
/// Errors from the operation are returned unchanged and leave the cursor
/// and state untouched, so a failed `get_next` can simply be retried.
///
/// `get_next` takes `&mut self`: a single pager cannot have two requests in
/// flight. Separate pagers are independent.
pub struct Pager<Op: ListOperation> {
    operation: Op,
    params: Op::Params,
    state: PagerState,
    pages_fetched: u64,
}

impl<Op: ListOperation> Pager<Op> {
    /// Create a pager. No request is made until the first `get_next`.
    pub fn new(operation: Op, params: Op::Params) -> Self {
        Self {
            operation,
            params,
            state: PagerState::Fresh,
            pages_fetched: 0,
        }
    }

    /// Whether another page can be requested
    pub fn has_next(&self) -> bool {
        self.state != PagerState::Exhausted
    }

    /// Current lifecycle state
    pub fn state(&self) -> PagerState {
        self.state
    }

    /// Parameters the next request will be made with
    pub fn params(&self) -> &Op::Params {
        &self.params
    }

    /// Number of pages successfully fetched so far
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// Fetch the next page and return its items.
    ///
    /// Returns [`Error::PagerExhausted`] once the last page has been read.
    pub async fn get_next(&mut self) -> Result<Vec<Op::Item>> {
        if self.state == PagerState::Exhausted {
            return Err(Error::PagerExhausted);
        }

        let page = self.operation.fetch_page(self.params.clone()).await?;
        self.pages_fetched += 1;

        match page.next_cursor {
            Some(cursor) => {
                debug!(
                    page = self.pages_fetched,
                    items = page.items.len(),
                    field = self.params.cursor_field(),
                    "page has continuation"
                );
                self.params.set_cursor(cursor);
                self.state = PagerState::HasMore;
            }
            None => {
                debug!(
                    page = self.pages_fetched,
                    items = page.items.len(),
                    "last page reached"
                );
                self.state = PagerState::Exhausted;
            }
        }

        Ok(page.items)
    }

    /// Fetch every remaining page and concatenate the items in server order.
    ///
    /// On error, items gathered by this call are dropped; the pager stays
    /// positioned at the page that failed.
    pub async fn get_all(&mut self) -> Result<Vec<Op::Item>> {
        let mut results = Vec::new();
        while self.has_next() {
            results.extend(self.get_next().await?);
        }
        Ok(results)
    }

    /// Turn the pager into a stream of pages.
    ///
    /// The stream ends after the last page, or right after yielding the
    /// first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Vec<Op::Item>>> {
        stream::unfold(Some(self), |pager| async move {
            let mut pager = pager?;
            if !pager.has_next() {
                return None;
            }
            match pager.get_next().await {
                Ok(items) => Some((Ok(items), Some(pager))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}

impl<Op: ListOperation> std::fmt::Debug for Pager<Op>
where
    Op::Params: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("params", &self.params)
            .field("state", &self.state)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}
