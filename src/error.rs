//! Error types for pagestream
//!
//! The pagination engine is generic over its error type and never wraps the
//! errors it forwards. This module defines the error used by the HTTP items
//! client, the items server, configuration loading and the CLI.

use thiserror::Error;

/// The main error type for pagestream
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Invalid page {page}: {message}")]
    InvalidPage { page: u64, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Wrapped Errors
    // ============================================================================
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<Error>,
    },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an invalid page error
    pub fn invalid_page(page: u64, message: impl Into<String>) -> Self {
        Self::InvalidPage {
            page,
            message: message.into(),
        }
    }

    /// True for 4xx responses, i.e. the request itself was wrong
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::HttpStatus { status, .. } => (400..500).contains(status),
            Error::InvalidPage { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias for pagestream
pub type Result<T> = std::result::Result<T, Error>;

/// Attach a description of what was being attempted to an error
pub trait ResultExt<T> {
    /// Wrap the error in [`Error::Context`], computing the message lazily
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::invalid_value("per_page", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'per_page': must be greater than zero"
        );

        let err = Error::http_status(400, "page must be positive");
        assert_eq!(err.to_string(), "HTTP 400: page must be positive");

        let err = Error::invalid_page(0, "pages start at 1");
        assert_eq!(err.to_string(), "Invalid page 0: pages start at 1");
    }

    #[test]
    fn test_is_client_error() {
        assert!(Error::http_status(400, "").is_client_error());
        assert!(Error::http_status(404, "").is_client_error());
        assert!(Error::invalid_page(0, "").is_client_error());

        assert!(!Error::http_status(500, "").is_client_error());
        assert!(!Error::http_status(503, "").is_client_error());
        assert!(!Error::config("test").is_client_error());
    }

    #[test]
    fn test_result_with_context_from_io() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = result
            .with_context(|| "reading source.yaml".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "reading source.yaml: IO error: missing");
        assert!(matches!(
            err,
            Error::Context { ref source, .. } if matches!(**source, Error::Io(_))
        ));
        assert!(std::error::Error::source(&err).is_some());
    }
}
