//! HTTP transport for the items source
//!
//! One operation: GET a JSON document from a path below a fixed base URL,
//! with the query string serialized from a typed request. Any non-2xx answer
//! becomes [`Error::HttpStatus`] carrying the response body. Each request is
//! sent exactly once.

use crate::error::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("pagestream/", env!("CARGO_PKG_VERSION"));

/// Where the source lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Base URL every request path is resolved below
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpClientConfig {
    /// Config for `base_url` with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replace the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// JSON-over-GET client bound to one base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Build a client, rejecting base URLs that cannot carry a path
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "base_url",
                format!("'{}' cannot be used as a base URL", config.base_url),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The parsed base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` below the base URL
    ///
    /// Unlike [`Url::join`], a path prefix on the base URL is kept:
    /// `http://host/api` + `/items` is `http://host/api/items`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// GET `path` with `query` serialized into the query string and decode
    /// the JSON body
    pub async fn get_json<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let start = Instant::now();

        let response = self.client.get(url.clone()).query(query).send().await?;
        let status = response.status().as_u16();

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%url, status, "request rejected");
            return Err(Error::http_status(status, body));
        }

        debug!(
            %url,
            status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request succeeded"
        );
        Ok(response.json().await?)
    }
}
