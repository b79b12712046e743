//! Child-process execution with a bounded wait.
//!
//! [`SystemExecutor`] implements [`CommandExecutor`] by spawning the program
//! directly (no shell), draining stdout and stderr on helper threads so the
//! child never blocks on a full pipe, and polling for exit. One deadline
//! covers both the exit and the drain of its output, so a background
//! grandchild holding the pipes open cannot stretch the wait. A child that
//! outlives the deadline is killed.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use dockwarden_config::{Config, DEFAULT_COMMAND_TIMEOUT_SECS};

use crate::command::DaemonCommand;
use crate::error::ControllerError;
use crate::executor::{CommandExecutor, CommandOutput};

/// Tracing target for child-process operations.
const PROCESS_TARGET: &str = "dockwarden::process";

/// Interval between exit-status polls.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

type Captured = (Stream, io::Result<Vec<u8>>);

/// Wall-clock budget shared by every wait on one child.
#[derive(Debug, Clone, Copy)]
struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    fn start(budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            budget,
        }
    }

    fn remaining(&self) -> Duration {
        self.budget.saturating_sub(self.started.elapsed())
    }

    fn has_passed(&self) -> bool {
        self.started.elapsed() > self.budget
    }
}

/// Executes commands as real child processes of the current process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemExecutor {
    timeout: Duration,
}

impl SystemExecutor {
    /// Creates an executor that gives up on children running longer than
    /// `timeout`, counting from launch until their output is drained.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Creates an executor using the configured command timeout.
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self::new(config.command_timeout())
    }

    /// Time budget granted to each child process.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS))
    }
}

impl CommandExecutor for SystemExecutor {
    fn run(&self, command: &DaemonCommand) -> Result<CommandOutput, ControllerError> {
        let program = command.program();
        debug!(target: PROCESS_TARGET, %command, "spawning child process");

        let deadline = Deadline::start(self.timeout);
        let mut child = Command::new(program)
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| ControllerError::SpawnFailed {
                program: program.to_owned(),
                source: Arc::new(err),
            })?;

        let stdout_pipe = child
            .stdout
            .take()
            .ok_or_else(|| missing_pipe(program, "stdout"))?;
        let stderr_pipe = child
            .stderr
            .take()
            .ok_or_else(|| missing_pipe(program, "stderr"))?;
        let (sender, receiver) = mpsc::channel();
        spawn_reader(Stream::Stdout, stdout_pipe, sender.clone());
        spawn_reader(Stream::Stderr, stderr_pipe, sender);

        let status = wait_for_exit(program, &mut child, deadline)?;
        let (stdout, stderr) = drain(program, &receiver, deadline)?;

        debug!(
            target: PROCESS_TARGET,
            %command,
            exit_code = status.code(),
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "child process exited"
        );
        Ok(CommandOutput::new(stdout, stderr, status.code()))
    }
}

fn missing_pipe(program: &str, stream: &str) -> ControllerError {
    ControllerError::Io {
        program: program.to_owned(),
        source: Arc::new(io::Error::other(format!("failed to capture {stream}"))),
    }
}

fn timed_out(program: &str, deadline: Deadline) -> ControllerError {
    ControllerError::Timeout {
        program: program.to_owned(),
        timeout: deadline.budget,
    }
}

/// Reads `pipe` to its end on a detached thread and reports it on `sender`.
fn spawn_reader(stream: Stream, mut pipe: impl Read + Send + 'static, sender: Sender<Captured>) {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let result = pipe.read_to_end(&mut buffer).map(|_| buffer);
        if sender.send((stream, result)).is_err() {
            debug!(target: PROCESS_TARGET, ?stream, "output arrived after the deadline");
        }
    });
}

/// Collects both output streams, giving up when the deadline passes.
fn drain(
    program: &str,
    receiver: &Receiver<Captured>,
    deadline: Deadline,
) -> Result<(String, String), ControllerError> {
    let mut stdout = None;
    let mut stderr = None;

    while stdout.is_none() || stderr.is_none() {
        let (stream, result) = match receiver.recv_timeout(deadline.remaining()) {
            Ok(captured) => captured,
            Err(RecvTimeoutError::Timeout) => {
                // The grandchild holding the pipe is not ours to kill.
                warn!(
                    target: PROCESS_TARGET,
                    program,
                    "child exited but its output pipes stayed open past the deadline"
                );
                return Err(timed_out(program, deadline));
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(ControllerError::Io {
                    program: program.to_owned(),
                    source: Arc::new(io::Error::other("output reader thread panicked")),
                });
            }
        };
        let bytes = result.map_err(|err| ControllerError::Io {
            program: program.to_owned(),
            source: Arc::new(err),
        })?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        match stream {
            Stream::Stdout => stdout = Some(text),
            Stream::Stderr => stderr = Some(text),
        }
    }

    Ok((stdout.unwrap_or_default(), stderr.unwrap_or_default()))
}

/// Waits for the child process to exit, killing it once the deadline passes.
fn wait_for_exit(
    program: &str,
    child: &mut Child,
    deadline: Deadline,
) -> Result<ExitStatus, ControllerError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if deadline.has_passed() {
                    warn!(
                        target: PROCESS_TARGET,
                        program,
                        timeout_ms = u64::try_from(deadline.budget.as_millis()).unwrap_or(u64::MAX),
                        "child process timed out, killing it"
                    );
                    drop(child.kill());
                    drop(child.wait());
                    return Err(timed_out(program, deadline));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(err) => {
                return Err(ControllerError::Io {
                    program: program.to_owned(),
                    source: Arc::new(err),
                });
            }
        }
    }
}
