//! Result and error types for the suite.

use thiserror::Error;

/// Result type for suite operations
pub type SuiteResult<T> = Result<T, SuiteError>;

/// Errors that can occur while driving the application under test
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page/CDP error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// Navigation error
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Element did not appear within the wait budget
    #[error("Element not found: {selector}")]
    ElementNotFound {
        /// Selector that failed to resolve
        selector: String,
    },

    /// Input rejected by the driven control
    #[error("Input rejected: {message}")]
    Input {
        /// Error message
        message: String,
    },

    /// A bounded wait expired
    #[error("Timed out after {ms}ms waiting for {what}")]
    Timeout {
        /// Condition that was being waited on
        what: String,
        /// Wait budget in milliseconds
        ms: u64,
    },

    /// Response status was outside the accepted set
    #[error("Unexpected status {actual}, expected one of {expected:?}")]
    UnexpectedStatus {
        /// Acceptable status codes
        expected: Vec<u16>,
        /// Status the server actually returned
        actual: u16,
    },

    /// Screenshot error
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Error message
        message: String,
    },

    /// Assertion failed
    #[error("Assertion failed: {message}")]
    Assertion {
        /// Error message
        message: String,
    },

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SuiteError {
    /// Shorthand for an assertion failure with a formatted message.
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_status_lists_accepted_codes() {
        let err = SuiteError::UnexpectedStatus {
            expected: vec![204, 404],
            actual: 500,
        };
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("204"));
        assert!(text.contains("404"));
    }

    #[test]
    fn timeout_reports_condition() {
        let err = SuiteError::Timeout {
            what: "table rows to settle".to_string(),
            ms: 5000,
        };
        assert_eq!(
            err.to_string(),
            "Timed out after 5000ms waiting for table rows to settle"
        );
    }
}
