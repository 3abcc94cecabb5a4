//! # pagestream
//!
//! Consume any paginated data source as a single lazy async stream.
//!
//! You supply two things:
//!
//! - a **fetcher**: `page token -> Future<Output = page result>`
//! - a **resolver**: `(page result, page token) -> Option<next page token>`
//!
//! and get back a [`Stream`](futures::Stream) that fetches one page per
//! poll, hands each page to the resolver, yields it, and ends after the page
//! for which the resolver returned `None`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use pagestream::http::{HttpClient, HttpClientConfig, ItemsClient};
//!
//! #[tokio::main]
//! async fn main() -> pagestream::Result<()> {
//!     let config = HttpClientConfig::new("http://localhost:3000");
//!     let client = ItemsClient::new(HttpClient::with_config(config)?);
//!
//!     // 20 items, 5 per page, starting at page 1
//!     let pages: Vec<_> = client.pages(20, 5, 1, None).try_collect().await?;
//!     assert_eq!(pages.len(), 4);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Paginated Sequence Engine                  │
//! │  paginate(fetch, options) → Stream<R>                       │
//! │  try_paginate(fetch, options) → Stream<Result<R, E>>        │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────────┬─────────────┴───────┬───────────────────────┐
//! │   Resolvers   │    Items client     │     Items server      │
//! ├───────────────┼─────────────────────┼───────────────────────┤
//! │ Page number   │ reqwest             │ axum GET /items       │
//! │ Offset        │ ItemsClient::pages  │                       │
//! │ Cursor        │                     │                       │
//! │ Max pages     │                     │                       │
//! └───────────────┴─────────────────────┴───────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Paginated sequence engine and resolver strategies
pub mod pagination;

/// HTTP client for the example items source
pub mod http;

/// Example items server
pub mod server;

/// Source configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use pagination::{
    paginate, try_paginate, PageResolver, PaginateOptions, Paginated, TryPageResolver,
    TryPaginated,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
