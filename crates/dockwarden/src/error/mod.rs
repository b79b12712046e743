//! Errors raised by controller operations.
//!
//! Only environment problems surface as [`ControllerError`]. A runtime that
//! answers with unexpected text is reported through
//! [`Outcome`](crate::Outcome) instead. I/O errors are wrapped in `Arc` to
//! satisfy the `result_large_err` Clippy lint.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Errors arising from daemon control operations.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The runtime did not answer the availability probe that guards every
    /// mutating operation.
    #[error("'{tool}' is not accessible, make sure it is installed and on the PATH")]
    RuntimeUnavailable {
        /// Runtime executable that was probed.
        tool: String,
    },

    /// A join parameter would not be passed through to the runtime verbatim.
    #[error("invalid join {field}: {reason}")]
    InvalidJoinParameter {
        /// Parameter that was rejected.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// The child process could not be started.
    #[error("failed to start '{program}': {source}")]
    SpawnFailed {
        /// Program that failed to launch.
        program: String,
        /// Underlying launch error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The child process did not finish within the configured timeout.
    #[error("'{program}' timed out after {timeout:?}")]
    Timeout {
        /// Program that was abandoned.
        program: String,
        /// Budget the program exceeded.
        timeout: Duration,
    },

    /// Communicating with or waiting on the child process failed.
    #[error("I/O error while running '{program}': {source}")]
    Io {
        /// Program being supervised.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The host operating system family has no restart procedure.
    #[error("unsupported platform family '{family}'")]
    UnsupportedPlatform {
        /// Family reported by the host.
        family: String,
    },
}

impl ControllerError {
    /// Returns `true` for the fatal precondition failure.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::RuntimeUnavailable { .. })
    }
}
