//! Result and error types for Ingresar.

use thiserror::Error;

/// Result type for Ingresar operations
pub type IngresarResult<T> = Result<T, IngresarError>;

/// Errors that can occur while running a scenario
#[derive(Debug, Error)]
pub enum IngresarError {
    /// Expected UI or network state did not materialize
    #[error("Assertion failed: {description} (expected {expected}, got {actual})")]
    AssertionFailure {
        /// What was being asserted
        description: String,
        /// Expected state
        expected: String,
        /// Observed state
        actual: String,
    },

    /// A wait exceeded its configured bound
    #[error("Timeout exceeded after {ms}ms: {operation}")]
    TimeoutExceeded {
        /// The operation that was waiting
        operation: String,
        /// Configured bound in milliseconds
        ms: u64,
    },

    /// Harness misuse, e.g. reentrant script access or a malformed check
    #[error("Invariant violation: {message}")]
    InvariantViolation {
        /// Error message
        message: String,
    },

    /// The underlying automation driver failed independently of test logic
    #[error("Driver error: {message}")]
    DriverError {
        /// Error message
        message: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IngresarError {
    /// Build an assertion failure with expected/actual diagnostics
    #[must_use]
    pub fn assertion(
        description: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::AssertionFailure {
            description: description.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Build a timeout error
    #[must_use]
    pub fn timeout(operation: impl Into<String>, ms: u64) -> Self {
        Self::TimeoutExceeded {
            operation: operation.into(),
            ms,
        }
    }

    /// Build an invariant violation
    #[must_use]
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Build a driver error
    #[must_use]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::DriverError {
            message: message.into(),
        }
    }

    /// Whether this error points at infrastructure rather than test logic.
    ///
    /// Reporting keeps driver failures apart from assertion failures so a
    /// flaky browser is never mistaken for a real regression.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        matches!(self, Self::DriverError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_carries_expected_and_actual() {
        let err = IngresarError::assertion("banner visible", "visible", "hidden");
        let msg = err.to_string();
        assert!(msg.contains("banner visible"));
        assert!(msg.contains("expected visible"));
        assert!(msg.contains("got hidden"));
    }

    #[test]
    fn timeout_reports_bound() {
        let err = IngresarError::timeout("wait for /dashboard", 5000);
        assert!(err.to_string().contains("5000ms"));
    }

    #[test]
    fn driver_errors_are_infrastructure() {
        assert!(IngresarError::driver("browser crashed").is_infrastructure());
        assert!(!IngresarError::assertion("x", "a", "b").is_infrastructure());
        assert!(!IngresarError::timeout("x", 1).is_infrastructure());
        assert!(!IngresarError::invariant("x").is_infrastructure());
    }
}
