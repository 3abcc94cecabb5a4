//! Resolver strategy implementations
//!
//! Each strategy handles a specific pagination pattern. The strategies only
//! compute the next token; extracting totals or cursors from a page result is
//! left to a caller-supplied closure, so they work with any response type.

use super::types::{PageResolver, TryPageResolver};

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination (e.g., `?page=2&per_page=50`)
///
/// Tokens are page numbers starting at 1. Continues while the pages fetched so
/// far cover fewer items than the total reported by the last response:
/// `page * per_page < total`. A response without a total ends pagination.
#[derive(Debug, Clone)]
pub struct PageNumberResolver<F> {
    /// Number of items per page
    pub per_page: u64,
    total: F,
}

impl<F> PageNumberResolver<F> {
    /// Create a page number resolver
    ///
    /// `total` extracts the total item count from a page result.
    pub fn new(per_page: u64, total: F) -> Self {
        Self { per_page, total }
    }
}

impl<R, F> PageResolver<R, u64> for PageNumberResolver<F>
where
    F: Fn(&R) -> Option<u64>,
{
    fn next_page(&mut self, last: &R, page: &u64) -> Option<u64> {
        if self.per_page == 0 {
            return None;
        }
        let total = (self.total)(last)?;
        let covered = page.saturating_mul(self.per_page);
        (covered < total).then(|| page + 1)
    }
}

impl<R, E, F> TryPageResolver<R, u64, E> for PageNumberResolver<F>
where
    F: Fn(&R) -> Option<u64>,
{
    fn try_next_page(&mut self, last: &R, page: &u64) -> Result<Option<u64>, E> {
        Ok(PageResolver::next_page(self, last, page))
    }
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination (e.g., `?offset=100&limit=50`)
///
/// Tokens are item offsets. Continues while `offset + limit < total`.
#[derive(Debug, Clone)]
pub struct OffsetResolver<F> {
    /// Number of items per page
    pub limit: u64,
    total: F,
}

impl<F> OffsetResolver<F> {
    /// Create an offset resolver
    pub fn new(limit: u64, total: F) -> Self {
        Self { limit, total }
    }
}

impl<R, F> PageResolver<R, u64> for OffsetResolver<F>
where
    F: Fn(&R) -> Option<u64>,
{
    fn next_page(&mut self, last: &R, offset: &u64) -> Option<u64> {
        if self.limit == 0 {
            return None;
        }
        let total = (self.total)(last)?;
        let next = offset.saturating_add(self.limit);
        (next < total).then_some(next)
    }
}

impl<R, E, F> TryPageResolver<R, u64, E> for OffsetResolver<F>
where
    F: Fn(&R) -> Option<u64>,
{
    fn try_next_page(&mut self, last: &R, offset: &u64) -> Result<Option<u64>, E> {
        Ok(PageResolver::next_page(self, last, offset))
    }
}

// ============================================================================
// Cursor Pagination
// ============================================================================

/// Cursor-based pagination (e.g., Stripe, Slack)
///
/// The next token is the cursor found in the last response. A missing or
/// empty cursor ends pagination.
#[derive(Debug, Clone)]
pub struct CursorResolver<F> {
    cursor: F,
}

impl<F> CursorResolver<F> {
    /// Create a cursor resolver
    pub fn new(cursor: F) -> Self {
        Self { cursor }
    }
}

impl<R, F> PageResolver<R, String> for CursorResolver<F>
where
    F: Fn(&R) -> Option<String>,
{
    fn next_page(&mut self, last: &R, _cursor: &String) -> Option<String> {
        (self.cursor)(last).filter(|next| !next.is_empty())
    }
}

impl<R, E, F> TryPageResolver<R, String, E> for CursorResolver<F>
where
    F: Fn(&R) -> Option<String>,
{
    fn try_next_page(&mut self, last: &R, cursor: &String) -> Result<Option<String>, E> {
        Ok(PageResolver::next_page(self, last, cursor))
    }
}

// ============================================================================
// Page Cap
// ============================================================================

/// Stops any resolver after a fixed number of pages
///
/// The first page is always fetched, so a limit of zero behaves like one.
#[derive(Debug, Clone)]
pub struct MaxPages<N> {
    inner: N,
    max: u64,
    resolved: u64,
}

impl<N> MaxPages<N> {
    /// Wrap `inner`, allowing at most `max` pages
    pub fn new(inner: N, max: u64) -> Self {
        Self {
            inner,
            max,
            resolved: 0,
        }
    }

    /// Pages resolved so far
    pub fn resolved(&self) -> u64 {
        self.resolved
    }

    fn limit_reached(&mut self) -> bool {
        self.resolved += 1;
        self.resolved >= self.max
    }
}

impl<R, P, N> PageResolver<R, P> for MaxPages<N>
where
    N: PageResolver<R, P>,
{
    fn next_page(&mut self, last: &R, page: &P) -> Option<P> {
        if self.limit_reached() {
            return None;
        }
        self.inner.next_page(last, page)
    }
}

impl<R, P, E, N> TryPageResolver<R, P, E> for MaxPages<N>
where
    N: TryPageResolver<R, P, E>,
{
    fn try_next_page(&mut self, last: &R, page: &P) -> Result<Option<P>, E> {
        if self.limit_reached() {
            return Ok(None);
        }
        self.inner.try_next_page(last, page)
    }
}
