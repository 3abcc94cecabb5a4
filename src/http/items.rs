//! Client for the paginated items endpoint
//!
//! `GET {base_url}/items?total=&page=&per_page=` answers with
//! `{"items": [...], "count": total}`. [`ItemsClient::pages`] wires that
//! endpoint into [`try_paginate`] with a page number resolver over `count`.

use super::client::HttpClient;
use crate::error::Result;
use crate::pagination::{try_paginate, MaxPages, PageNumberResolver, PaginateOptions};
use futures::stream::FusedStream;
use serde::{Deserialize, Serialize};

/// Default path of the items endpoint
pub const DEFAULT_ITEMS_PATH: &str = "/items";

/// Query for a single page of items, sent as `?total=&page=&per_page=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItemsRequest {
    /// Total number of items the source should pretend to hold
    pub total: u64,
    /// 1-based page number
    pub page: u64,
    /// Items per page
    pub per_page: u64,
}

/// One page of items
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemsPage {
    /// Items on this page
    pub items: Vec<u64>,
    /// Total number of items across all pages
    pub count: u64,
}

impl ItemsPage {
    /// Total count reported by the source
    pub fn total(&self) -> Option<u64> {
        Some(self.count)
    }
}

/// Client for the items endpoint
#[derive(Debug, Clone)]
pub struct ItemsClient {
    http: HttpClient,
    path: String,
}

impl ItemsClient {
    /// Create a client for `{base_url}/items`
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            path: DEFAULT_ITEMS_PATH.to_string(),
        }
    }

    /// Use a different endpoint path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Fetch a single page
    ///
    /// A non-2xx answer becomes [`Error::HttpStatus`](crate::Error::HttpStatus)
    /// carrying the response body.
    pub async fn list_items(&self, request: ListItemsRequest) -> Result<ItemsPage> {
        self.http.get_json(&self.path, &request).await
    }

    /// Lazily fetch every page of a `total`-item source, starting at
    /// `initial_page`, optionally stopping after `max_pages`.
    ///
    /// The first failed request is yielded and ends the stream.
    pub fn pages(
        &self,
        total: u64,
        per_page: u64,
        initial_page: u64,
        max_pages: Option<u64>,
    ) -> impl FusedStream<Item = Result<ItemsPage>> + '_ {
        let resolver = MaxPages::new(
            PageNumberResolver::new(per_page, ItemsPage::total),
            max_pages.unwrap_or(u64::MAX),
        );

        try_paginate(
            move |page: u64| {
                self.list_items(ListItemsRequest {
                    total,
                    page,
                    per_page,
                })
            },
            PaginateOptions::new(initial_page, resolver),
        )
    }
}
