//! Classified results of runtime commands.
//!
//! The runtime signals success only through the text it prints, so each
//! operation classifies captured stdout against a known banner. The raw
//! output is kept alongside the verdict for diagnosis.

use serde::Serialize;

use crate::executor::CommandOutput;

/// Printed by the runtime after joining a swarm as a worker.
pub const JOINED_BANNER: &str = "This node joined a swarm as a worker.";

/// Printed by the runtime after leaving a swarm.
pub const LEFT_BANNER: &str = "Node left the default swarm.";

/// Lower-case prefix that marks a failed container listing.
pub const ERROR_PREFIX: &str = "error";

/// Verdict plus the raw output it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    succeeded: bool,
    #[serde(flatten)]
    output: CommandOutput,
}

impl Outcome {
    /// Pairs a verdict with the output it was derived from.
    #[must_use]
    pub const fn new(succeeded: bool, output: CommandOutput) -> Self {
        Self { succeeded, output }
    }

    /// Succeeds when stdout begins with `banner` (case-sensitive).
    #[must_use]
    pub fn expecting_banner(output: CommandOutput, banner: &str) -> Self {
        let succeeded = output.stdout().starts_with(banner);
        Self::new(succeeded, output)
    }

    /// Succeeds unless lower-cased stdout begins with `"error"`.
    #[must_use]
    pub fn rejecting_error_prefix(output: CommandOutput) -> Self {
        let succeeded = !output.stdout().to_lowercase().starts_with(ERROR_PREFIX);
        Self::new(succeeded, output)
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.succeeded
    }

    /// Full captured output.
    #[must_use]
    pub const fn output(&self) -> &CommandOutput {
        &self.output
    }

    /// Captured standard output.
    #[must_use]
    pub const fn stdout(&self) -> &str {
        self.output.stdout()
    }

    /// Captured standard error.
    #[must_use]
    pub const fn stderr(&self) -> &str {
        self.output.stderr()
    }

    /// Exit code of the classified command.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        self.output.exit_code()
    }
}
