//! Error types for followfeed
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Two variants make up the user-facing taxonomy: [`Error::FeedLoad`] for
//! anything that goes wrong while loading the feed, and [`Error::Action`]
//! for failed create/follow/unfollow requests. Both end the request that
//! raised them and never the session.

use thiserror::Error;

/// The main error type for followfeed
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Feed / Action Errors
    // ============================================================================
    #[error("Failed to load feed: {message}")]
    FeedLoad { message: String },

    #[error("Failed to {action}: {message}")]
    Action { action: String, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

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

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a feed load error
    pub fn feed_load(message: impl Into<String>) -> Self {
        Self::FeedLoad {
            message: message.into(),
        }
    }

    /// Create an action error
    pub fn action(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Action {
            action: action.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
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

    /// Wrap any lower-level error as a feed load failure
    #[must_use]
    pub fn into_feed_load(self) -> Self {
        match self {
            Self::FeedLoad { .. } => self,
            other => Self::feed_load(other.to_string()),
        }
    }

    /// Check if this error came from the feed endpoint
    pub fn is_feed_load(&self) -> bool {
        matches!(self, Self::FeedLoad { .. })
    }

    /// Check if this error came from a mutation endpoint
    pub fn is_action(&self) -> bool {
        matches!(self, Self::Action { .. })
    }
}

/// Result type alias for followfeed
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
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

        let err = Error::feed_load("backend said no");
        assert_eq!(err.to_string(), "Failed to load feed: backend said no");

        let err = Error::action("follow user", "Ratelimited");
        assert_eq!(err.to_string(), "Failed to follow user: Ratelimited");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_into_feed_load() {
        let err = Error::http_status(500, "boom").into_feed_load();
        assert!(err.is_feed_load());
        assert_eq!(err.to_string(), "Failed to load feed: HTTP 500: boom");

        let err = Error::feed_load("already").into_feed_load();
        assert_eq!(err.to_string(), "Failed to load feed: already");
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
