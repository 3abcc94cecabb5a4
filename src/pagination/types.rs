//! Pagination types and traits
//!
//! Defines the next-page policy abstractions used by the paginated streams.

/// Decides which page comes after the one just fetched.
///
/// Returning `None` means there are no more pages. The page that was just
/// fetched is still delivered to the consumer.
///
/// Implemented for any `FnMut(&R, &P) -> Option<P>`.
pub trait PageResolver<R, P> {
    /// Compute the next page token from the last result and the token that produced it
    fn next_page(&mut self, last: &R, page: &P) -> Option<P>;
}

impl<R, P, F> PageResolver<R, P> for F
where
    F: FnMut(&R, &P) -> Option<P>,
{
    fn next_page(&mut self, last: &R, page: &P) -> Option<P> {
        self(last, page)
    }
}

/// Fallible counterpart of [`PageResolver`], used by
/// [`try_paginate`](super::try_paginate).
///
/// An `Err` fails the current step: the page it was resolving is dropped and
/// the error is yielded in its place.
///
/// Implemented for any `FnMut(&R, &P) -> Result<Option<P>, E>`.
pub trait TryPageResolver<R, P, E> {
    /// Compute the next page token, or fail the current step
    fn try_next_page(&mut self, last: &R, page: &P) -> Result<Option<P>, E>;
}

impl<R, P, E, F> TryPageResolver<R, P, E> for F
where
    F: FnMut(&R, &P) -> Result<Option<P>, E>,
{
    fn try_next_page(&mut self, last: &R, page: &P) -> Result<Option<P>, E> {
        self(last, page)
    }
}

/// Where pagination starts and how it advances
#[derive(Debug, Clone)]
pub struct PaginateOptions<P, N> {
    /// Token passed to the first fetch
    pub initial_page: P,
    /// Next-page policy
    pub next_page: N,
}

impl<P, N> PaginateOptions<P, N> {
    /// Create pagination options
    pub fn new(initial_page: P, next_page: N) -> Self {
        Self {
            initial_page,
            next_page,
        }
    }
}
