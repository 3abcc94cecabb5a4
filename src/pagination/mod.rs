//! Pagination module
//!
//! Turns "fetch one page" plus "decide the next page" into a single lazy
//! [`Stream`](futures::Stream) of pages.
//!
//! # Overview
//!
//! - [`paginate`] - infallible fetcher, yields every page result as-is
//! - [`try_paginate`] - fallible fetcher and resolver, stops on the first error
//! - [`PageResolver`] / [`TryPageResolver`] - the next-page policy
//! - Ready-made resolvers: page number, offset, cursor and a page cap
//!
//! Each poll issues at most one fetch. Nothing is fetched until the stream is
//! first polled, and nothing is fetched ahead of the consumer.

mod state;
mod strategies;
mod stream;
mod types;

pub use strategies::{CursorResolver, MaxPages, OffsetResolver, PageNumberResolver};
pub use stream::{paginate, try_paginate, Paginated, TryPaginated};
pub use types::{PageResolver, PaginateOptions, TryPageResolver};
