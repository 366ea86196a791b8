//! Custom error types for smokecheck
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for smokecheck operations
#[derive(Error, Debug)]
pub enum SmokecheckError {
    /// Browser launch or CDP session errors
    #[error("Browser error: {0}")]
    Browser(String),

    /// The readiness element did not become enabled in time
    #[error("readiness element {locator} did not become enabled within {timeout_ms}ms")]
    ReadinessTimeout { locator: String, timeout_ms: u64 },

    /// The target page could not be reached
    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// DevTools protocol errors
    #[error("CDP error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid target URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Convenience Result type for smokecheck operations
pub type Result<T> = std::result::Result<T, SmokecheckError>;

impl SmokecheckError {
    /// Create a browser error
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a navigation error
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Whether this error is the bounded readiness wait expiring
    pub fn is_readiness_timeout(&self) -> bool {
        matches!(self, Self::ReadinessTimeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_timeout_display() {
        let err = SmokecheckError::ReadinessTimeout {
            locator: "button \"Start Recording\"".to_string(),
            timeout_ms: 20000,
        };
        assert!(err.to_string().contains("20000ms"));
        assert!(err.is_readiness_timeout());
    }

    #[test]
    fn test_navigation_display() {
        let err = SmokecheckError::navigation("http://localhost:5173/", "connection refused");
        assert!(err.to_string().contains("http://localhost:5173/"));
        assert!(!err.is_readiness_timeout());
    }
}
