//! Argument-vector commands issued to the runtime and the service manager.
//!
//! Commands are never assembled into a shell string. Each argument reaches
//! the child process verbatim, so caller-supplied join parameters cannot
//! inject further commands. Join parameters are still validated because the
//! runtime would parse a value starting with `-` as an option.

use std::fmt;

use crate::error::ControllerError;
use crate::platform::Platform;

/// Placeholder printed instead of secret arguments.
const REDACTED: &str = "<redacted>";

/// A program plus its arguments, ready to hand to a
/// [`CommandExecutor`](crate::CommandExecutor).
///
/// # Example
///
/// ```
/// use dockwarden::DaemonCommand;
///
/// let command = DaemonCommand::swarm_leave("docker", true);
/// assert_eq!(command.program(), "docker");
/// assert_eq!(command.args(), ["swarm", "leave", "-f"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonCommand {
    program: String,
    args: Vec<String>,
    secret_arg: Option<usize>,
}

impl DaemonCommand {
    /// Creates a command from a program and its arguments.
    #[must_use]
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            secret_arg: None,
        }
    }

    /// `<tool> -v`
    #[must_use]
    pub fn version_query(tool: &str) -> Self {
        Self::new(tool, ["-v"])
    }

    /// `<tool> swarm join --token <token> <address>:<port>`
    ///
    /// The token is redacted from the [`Display`](fmt::Display) rendering.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::InvalidJoinParameter`] when the address or
    /// token is empty, starts with `-`, or contains whitespace or control
    /// characters, or when the port is zero.
    pub fn swarm_join(
        tool: &str,
        address: &str,
        port: u16,
        token: &str,
    ) -> Result<Self, ControllerError> {
        validate_join_value("address", address)?;
        validate_join_value("token", token)?;
        if port == 0 {
            return Err(ControllerError::InvalidJoinParameter {
                field: "port",
                reason: "must be non-zero",
            });
        }

        let mut command = Self::new(
            tool,
            [
                String::from("swarm"),
                String::from("join"),
                String::from("--token"),
                token.to_owned(),
                format!("{address}:{port}"),
            ],
        );
        command.secret_arg = Some(3);
        Ok(command)
    }

    /// `<tool> swarm leave`, with `-f` appended when `force` is set.
    #[must_use]
    pub fn swarm_leave(tool: &str, force: bool) -> Self {
        if force {
            Self::new(tool, ["swarm", "leave", "-f"])
        } else {
            Self::new(tool, ["swarm", "leave"])
        }
    }

    /// Stops `service` through the platform's service manager.
    #[must_use]
    pub fn service_stop(platform: Platform, service: &str) -> Self {
        Self::new(platform.service_manager(), ["stop", service])
    }

    /// Starts `service` through the platform's service manager.
    #[must_use]
    pub fn service_start(platform: Platform, service: &str) -> Self {
        Self::new(platform.service_manager(), ["start", service])
    }

    /// `<tool> ps`
    #[must_use]
    pub fn list_containers(tool: &str) -> Self {
        Self::new(tool, ["ps"])
    }

    /// Program to execute.
    #[must_use]
    pub const fn program(&self) -> &str {
        self.program.as_str()
    }

    /// Arguments passed to the program, unredacted.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for DaemonCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for (index, arg) in self.args.iter().enumerate() {
            let shown = if self.secret_arg == Some(index) {
                REDACTED
            } else {
                arg.as_str()
            };
            write!(f, " {shown}")?;
        }
        Ok(())
    }
}

fn validate_join_value(field: &'static str, value: &str) -> Result<(), ControllerError> {
    let reason = if value.is_empty() {
        "must not be empty"
    } else if value.starts_with('-') {
        "must not start with '-'"
    } else if value
        .chars()
        .any(|character| character.is_whitespace() || character.is_control())
    {
        "must not contain whitespace or control characters"
    } else {
        return Ok(());
    };
    Err(ControllerError::InvalidJoinParameter { field, reason })
}
