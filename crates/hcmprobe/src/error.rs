//! Result and error types for the suite.

use thiserror::Error;

/// Result type for suite operations
pub type SuiteResult<T> = Result<T, SuiteError>;

/// Errors that can occur while driving the application under test
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Browser could not be launched
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation failed
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// An awaited UI condition never became true within its budget
    #[error("Timed out after {ms}ms waiting for {condition}")]
    WaitTimeout {
        /// Description of the awaited condition
        condition: String,
        /// Timeout budget in milliseconds
        ms: u64,
    },

    /// In-page script evaluation failed
    #[error("Evaluation failed: {message}")]
    Eval {
        /// Error message
        message: String,
    },

    /// Requested widget name is not in the known mapping
    #[error("No widget named '{name}'")]
    UnknownWidget {
        /// The unknown name
        name: String,
    },

    /// Element index outside the current element list
    #[error("Index {index} out of range for {count} elements")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of elements present
        count: usize,
    },

    /// Observed value did not match the expected value
    #[error("Assertion failed: expected {expected:?}, got {actual:?}")]
    Assertion {
        /// Expected value
        expected: String,
        /// Observed value
        actual: String,
    },

    /// Screenshot capture failed
    #[error("Screenshot failed: {message}")]
    Screenshot {
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
    /// Whether this is a wait-timeout failure (as opposed to an assertion
    /// mismatch or an infrastructure error)
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::WaitTimeout { .. })
    }
}
