//! Execution seam between the controller and child processes.
//!
//! The [`CommandExecutor`] abstraction lets tests script runtime replies
//! without spawning real processes. The production implementation is
//! [`SystemExecutor`](crate::process::SystemExecutor).

use serde::Serialize;

use crate::command::DaemonCommand;
use crate::error::ControllerError;

/// Everything captured from a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    stdout: String,
    stderr: String,
    exit_code: Option<i32>,
}

impl CommandOutput {
    /// Creates a captured output record.
    #[must_use]
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Output of a process that printed `stdout` and exited with status 0.
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self::new(stdout, "", Some(0))
    }

    /// Captured standard output.
    #[must_use]
    pub const fn stdout(&self) -> &str {
        self.stdout.as_str()
    }

    /// Captured standard error.
    #[must_use]
    pub const fn stderr(&self) -> &str {
        self.stderr.as_str()
    }

    /// Exit code, or `None` when the process was terminated by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }
}

/// Runs a [`DaemonCommand`] to completion and captures its output.
///
/// # Example
///
/// ```
/// use dockwarden::{CommandExecutor, CommandOutput, ControllerError, DaemonCommand};
///
/// struct CannedExecutor;
///
/// impl CommandExecutor for CannedExecutor {
///     fn run(&self, _command: &DaemonCommand) -> Result<CommandOutput, ControllerError> {
///         Ok(CommandOutput::success("Docker version 27.0.3, build 7d4bcd8\n"))
///     }
/// }
///
/// # fn main() -> Result<(), ControllerError> {
/// let output = CannedExecutor.run(&DaemonCommand::version_query("docker"))?;
/// assert!(output.stdout().starts_with("Docker version"));
/// # Ok(())
/// # }
/// ```
pub trait CommandExecutor {
    /// Runs the command and waits for it to exit.
    ///
    /// A non-zero exit status is not an error: it is reported through
    /// [`CommandOutput::exit_code`].
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::SpawnFailed`] if the program cannot be
    /// launched, [`ControllerError::Timeout`] if it outlives the executor's
    /// time budget, or [`ControllerError::Io`] if its output cannot be read.
    fn run(&self, command: &DaemonCommand) -> Result<CommandOutput, ControllerError>;
}

impl<E: CommandExecutor + ?Sized> CommandExecutor for &E {
    fn run(&self, command: &DaemonCommand) -> Result<CommandOutput, ControllerError> {
        (**self).run(command)
    }
}
