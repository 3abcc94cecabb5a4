//! Paginated stream implementations
//!
//! Both streams drive the same `Idle -> Fetching -> Idle | Exhausted` state
//! machine; they differ only in how fetch and resolver failures surface.

use super::state::PageState;
use super::types::{PageResolver, PaginateOptions, TryPageResolver};
use futures::stream::{FusedStream, Stream};
use futures::{ready, TryFuture};
use pin_project_lite::pin_project;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::trace;

// ============================================================================
// Infallible Pagination
// ============================================================================

/// Consume a paginated source as a lazy stream of page results.
///
/// `fetch_page` is called with the current page token each time the consumer
/// polls for the next element. Its output is handed to `options.next_page`
/// together with the token, then yielded. When the resolver returns `None`
/// the page is still yielded and the stream ends after it.
///
/// Fetch results are opaque: a fetcher returning `Result<T, E>` produces a
/// stream of `Result<T, E>` that keeps going past errors for as long as the
/// resolver allows. Use [`try_paginate`] to stop on the first error.
///
/// ```rust
/// use futures::StreamExt;
/// use pagestream::pagination::{paginate, PaginateOptions};
///
/// # tokio_test::block_on(async {
/// let pages = paginate(
///     |page: u32| async move { vec![page * 10, page * 10 + 1] },
///     PaginateOptions::new(1, |_: &Vec<u32>, page: &u32| (*page < 3).then(|| page + 1)),
/// );
///
/// let all: Vec<Vec<u32>> = pages.collect().await;
/// assert_eq!(all, vec![vec![10, 11], vec![20, 21], vec![30, 31]]);
/// # });
/// ```
pub fn paginate<P, R, F, Fut, N>(
    fetch_page: F,
    options: PaginateOptions<P, N>,
) -> Paginated<P, F, Fut, N>
where
    P: Clone,
    F: FnMut(P) -> Fut,
    Fut: Future<Output = R>,
    N: PageResolver<R, P>,
{
    Paginated {
        fetch_page,
        next_page: options.next_page,
        state: PageState::new(options.initial_page),
        pages_fetched: 0,
    }
}

pin_project! {
    /// Stream returned by [`paginate`].
    #[must_use = "streams do nothing unless polled"]
    pub struct Paginated<P, F, Fut, N> {
        fetch_page: F,
        next_page: N,
        #[pin]
        state: PageState<P, Fut>,
        pages_fetched: u64,
    }
}

impl<P, F, Fut, N> Paginated<P, F, Fut, N> {
    /// Number of fetches issued so far
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// True once the resolver has signalled the last page
    pub fn is_exhausted(&self) -> bool {
        self.state.is_exhausted()
    }
}

impl<P, R, F, Fut, N> Stream for Paginated<P, F, Fut, N>
where
    P: Clone,
    F: FnMut(P) -> Fut,
    Fut: Future<Output = R>,
    N: PageResolver<R, P>,
{
    type Item = R;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<R>> {
        let mut this = self.project();

        if let Some(page) = this.state.as_mut().take_idle() {
            *this.pages_fetched += 1;
            trace!(pages_fetched = *this.pages_fetched, "fetching page");
            let future = (this.fetch_page)(page.clone());
            this.state.set(PageState::Fetching { future, page });
        }

        let Some(future) = this.state.as_mut().project_future() else {
            return Poll::Ready(None);
        };
        let result = ready!(future.poll(cx));

        let next = this
            .state
            .as_mut()
            .finish_fetch()
            .and_then(|page| this.next_page.next_page(&result, &page));
        match next {
            Some(page) => this.state.set(PageState::Idle { page }),
            None => trace!(pages_fetched = *this.pages_fetched, "pagination exhausted"),
        }

        Poll::Ready(Some(result))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state.is_exhausted() {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

impl<P, R, F, Fut, N> FusedStream for Paginated<P, F, Fut, N>
where
    P: Clone,
    F: FnMut(P) -> Fut,
    Fut: Future<Output = R>,
    N: PageResolver<R, P>,
{
    fn is_terminated(&self) -> bool {
        self.state.is_exhausted()
    }
}

impl<P, F, Fut, N> fmt::Debug for Paginated<P, F, Fut, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginated")
            .field("pages_fetched", &self.pages_fetched)
            .field("exhausted", &self.state.is_exhausted())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fallible Pagination
// ============================================================================

/// Like [`paginate`], but the fetcher returns `Result` and the first error
/// ends the stream.
///
/// - A fetch error is yielded as-is; the resolver is not called for it.
/// - A resolver error is yielded instead of the page it was resolving.
///
/// Either way the stream is terminated afterwards and issues no more fetches.
pub fn try_paginate<P, F, Fut, N>(
    fetch_page: F,
    options: PaginateOptions<P, N>,
) -> TryPaginated<P, F, Fut, N>
where
    P: Clone,
    F: FnMut(P) -> Fut,
    Fut: TryFuture,
    N: TryPageResolver<Fut::Ok, P, Fut::Error>,
{
    TryPaginated {
        fetch_page,
        next_page: options.next_page,
        state: PageState::new(options.initial_page),
        pages_fetched: 0,
    }
}

pin_project! {
    /// Stream returned by [`try_paginate`].
    #[must_use = "streams do nothing unless polled"]
    pub struct TryPaginated<P, F, Fut, N> {
        fetch_page: F,
        next_page: N,
        #[pin]
        state: PageState<P, Fut>,
        pages_fetched: u64,
    }
}

impl<P, F, Fut, N> TryPaginated<P, F, Fut, N> {
    /// Number of fetches issued so far
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// True once the last page was delivered or an error ended the stream
    pub fn is_exhausted(&self) -> bool {
        self.state.is_exhausted()
    }
}

impl<P, F, Fut, N> Stream for TryPaginated<P, F, Fut, N>
where
    P: Clone,
    F: FnMut(P) -> Fut,
    Fut: TryFuture,
    N: TryPageResolver<Fut::Ok, P, Fut::Error>,
{
    type Item = Result<Fut::Ok, Fut::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if let Some(page) = this.state.as_mut().take_idle() {
            *this.pages_fetched += 1;
            trace!(pages_fetched = *this.pages_fetched, "fetching page");
            let future = (this.fetch_page)(page.clone());
            this.state.set(PageState::Fetching { future, page });
        }

        let Some(future) = this.state.as_mut().project_future() else {
            return Poll::Ready(None);
        };
        let outcome = ready!(future.try_poll(cx));

        // Exhausted from here on unless the resolver hands back a next page
        let page = this.state.as_mut().finish_fetch();
        let result = match outcome {
            Ok(result) => result,
            Err(e) => return Poll::Ready(Some(Err(e))),
        };

        if let Some(page) = page {
            match this.next_page.try_next_page(&result, &page) {
                Ok(Some(next)) => this.state.set(PageState::Idle { page: next }),
                Ok(None) => trace!(pages_fetched = *this.pages_fetched, "pagination exhausted"),
                Err(e) => return Poll::Ready(Some(Err(e))),
            }
        }

        Poll::Ready(Some(Ok(result)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state.is_exhausted() {
            (0, Some(0))
        } else {
            (0, None)
        }
    }
}

impl<P, F, Fut, N> FusedStream for TryPaginated<P, F, Fut, N>
where
    P: Clone,
    F: FnMut(P) -> Fut,
    Fut: TryFuture,
    N: TryPageResolver<Fut::Ok, P, Fut::Error>,
{
    fn is_terminated(&self) -> bool {
        self.state.is_exhausted()
    }
}

impl<P, F, Fut, N> fmt::Debug for TryPaginated<P, F, Fut, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryPaginated")
            .field("pages_fetched", &self.pages_fetched)
            .field("exhausted", &self.state.is_exhausted())
            .finish_non_exhaustive()
    }
}
