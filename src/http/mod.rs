//! HTTP client module
//!
//! Provides the transport side of the example paginated source.
//!
//! # Features
//!
//! - **HttpClient**: reqwest GET-JSON client bound to one base URL
//! - **ItemsClient**: typed client for the `/items` endpoint, including a
//!   lazy stream over all of its pages

mod client;
mod items;

pub use client::{HttpClient, HttpClientConfig, DEFAULT_TIMEOUT};
pub use items::{ItemsClient, ItemsPage, ListItemsRequest, DEFAULT_ITEMS_PATH};

#[cfg(test)]
mod tests;
