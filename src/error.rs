//! Error types used by the supervisor and work units.
//!
//! This module defines two error enums:
//!
//! - [`WorkError`] — errors raised by the caller's work unit or final action.
//! - [`HookError`] — errors raised by lifecycle hooks.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for
//! logs/metrics. Neither error ever propagates out of
//! [`Supervisor::run`](crate::Supervisor::run): work faults downgrade the
//! outcome to "not completed", hook faults are contained and logged.

use thiserror::Error;

/// # Errors produced by a work unit or final action.
///
/// A work unit that returns an error is recorded as an incomplete run;
/// the error is logged at critical severity and swallowed so the shutdown
/// sequence still executes.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum WorkError {
    /// Work execution failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Work observed cancellation and exited early.
    #[error("context cancelled")]
    Canceled,
}

impl WorkError {
    /// Convenience constructor for a failure with a message.
    pub fn fail(error: impl Into<String>) -> Self {
        WorkError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use runguard::WorkError;
    ///
    /// let err = WorkError::fail("boom");
    /// assert_eq!(err.as_label(), "work_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            WorkError::Fail { .. } => "work_failed",
            WorkError::Canceled => "work_canceled",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            WorkError::Fail { error } => format!("error: {error}"),
            WorkError::Canceled => "context cancelled".to_string(),
        }
    }

    /// True if the work unit exited due to cancellation rather than failure.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, WorkError::Canceled)
    }
}

/// # Errors produced by lifecycle hooks.
///
/// Hooks run during teardown; their errors are always contained by the
/// supervisor and surface only through events. Panics inside hooks are
/// caught and converted into the same contained form.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HookError {
    /// Hook execution failed.
    #[error("hook failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },
}

impl HookError {
    /// Convenience constructor for a failure with a message.
    pub fn fail(error: impl Into<String>) -> Self {
        HookError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HookError::Fail { .. } => "hook_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HookError::Fail { error } => format!("error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_error_labels() {
        assert_eq!(WorkError::fail("x").as_label(), "work_failed");
        assert_eq!(WorkError::Canceled.as_label(), "work_canceled");
    }

    #[test]
    fn test_cancellation_predicate() {
        assert!(WorkError::Canceled.is_cancellation());
        assert!(!WorkError::fail("x").is_cancellation());
    }

    #[test]
    fn test_hook_error_message() {
        let err = HookError::fail("db handle leaked");
        assert_eq!(err.as_message(), "error: db handle leaked");
        assert_eq!(err.to_string(), "hook failed: db handle leaked");
    }
}
