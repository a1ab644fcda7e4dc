//! Result and error types for the suite.

use thiserror::Error;

/// Result type for suite operations
pub type SuiteResult<T> = Result<T, SuiteError>;

/// Errors that can occur while driving the target application
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Page/driver error
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

    /// Page did not reach the expected location within the timeout
    #[error("Expected location matching '{expected}' but was '{actual}' after {timeout_ms}ms")]
    NavigationTimeout {
        /// Expected path fragment
        expected: String,
        /// Actual URL observed
        actual: String,
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// Bounded wait elapsed
    #[error("Timed out after {ms}ms waiting for {waiting_for}")]
    Timeout {
        /// What was being waited for
        waiting_for: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Test-account credentials absent from the environment
    #[error("Missing credential environment variable '{variable}'")]
    MissingCredentials {
        /// Name of the missing variable
        variable: String,
    },

    /// Principal amount outside the slider range
    #[error("Principal amount {value} is outside the accepted range [0, 15000]")]
    PrincipalOutOfRange {
        /// Rejected value
        value: f64,
    },

    /// Interest rate outside the dropdown choices
    #[error("Interest rate '{value}' is not one of the offered percentages (1..=15)")]
    InvalidRate {
        /// Rejected value
        value: String,
    },

    /// Duration string outside {Daily, Monthly, Yearly}
    #[error("Invalid duration '{value}' (expected Daily, Monthly or Yearly)")]
    InvalidDuration {
        /// Rejected value
        value: String,
    },

    /// Assertion mismatch, carrying both sides
    #[error("Assertion failed ({context}): expected {expected}, got {actual}")]
    Assertion {
        /// What was being checked
        context: String,
        /// Expected value
        expected: String,
        /// Actual value
        actual: String,
    },

    /// Fixture error (setup/teardown failed)
    #[error("Fixture error: {message}")]
    Fixture {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SuiteError {
    /// Build an assertion-mismatch error.
    pub fn assertion(
        context: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Assertion {
            context: context.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_carries_both_sides() {
        let err = SuiteError::assertion("interest amount", "15.00", "14.99");
        let msg = err.to_string();
        assert!(msg.contains("interest amount"));
        assert!(msg.contains("15.00"));
        assert!(msg.contains("14.99"));
    }

    #[test]
    fn principal_range_message_names_bounds() {
        let err = SuiteError::PrincipalOutOfRange { value: 15001.0 };
        assert!(err.to_string().contains("[0, 15000]"));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SuiteError = io.into();
        assert!(matches!(err, SuiteError::Io(_)));
    }
}
