//! Configuration for the paginated items source
//!
//! A source is described in YAML (or JSON, picked by file extension):
//!
//! ```yaml
//! base_url: http://localhost:3000
//! total: 20
//! per_page: 5
//! initial_page: 1
//! timeout_secs: 30
//! max_pages: 10
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, DEFAULT_ITEMS_PATH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Where the items live and how to page through them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the items server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Endpoint path
    #[serde(default = "default_path")]
    pub path: String,

    /// Total number of items the source holds
    #[serde(default = "default_total")]
    pub total: u64,

    /// Items per page
    #[serde(default = "default_per_page")]
    pub per_page: u64,

    /// First page to request (1-based)
    #[serde(default = "default_initial_page")]
    pub initial_page: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Stop after this many pages
    #[serde(default)]
    pub max_pages: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_path() -> String {
    DEFAULT_ITEMS_PATH.to_string()
}

fn default_total() -> u64 {
    20
}

fn default_per_page() -> u64 {
    5
}

fn default_initial_page() -> u64 {
    1
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_path(),
            total: default_total(),
            per_page: default_per_page(),
            initial_page: default_initial_page(),
            timeout_secs: default_timeout_secs(),
            max_pages: None,
        }
    }
}

impl SourceConfig {
    /// Load a source config from a YAML or JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        };
        parsed.with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a source config from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse a source config from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Reject configs that cannot produce a valid first request
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;

        if self.per_page == 0 {
            return Err(Error::invalid_value("per_page", "must be greater than zero"));
        }
        if self.initial_page == 0 {
            return Err(Error::invalid_page(0, "pages start at 1"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value(
                "timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// HTTP client settings for this source
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::new(&self.base_url)
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}
