//! Daemon availability, swarm membership and restart control.
//!
//! [`DaemonController`] owns its availability flag and the active project;
//! there is no process-wide instance. Every mutating operation takes
//! `&mut self` and re-probes the runtime immediately before acting, so the
//! probe and the command it guards cannot interleave with another caller.
//! Share a controller across threads by wrapping it in a `Mutex`.
//!
//! # Error tiers
//!
//! - `Err(ControllerError::RuntimeUnavailable)` when the guarding probe
//!   fails. Nothing else is executed.
//! - `Err(..)` for other environment failures (launch errors, timeouts).
//! - `Ok(Outcome)` otherwise. An unexpected reply from the runtime is
//!   `Outcome::is_success() == false`, never an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use dockwarden::{DaemonController, JoinParameters, SystemExecutor};
//! use dockwarden_config::Config;
//!
//! # fn main() -> Result<(), dockwarden::ControllerError> {
//! let config = Config::default();
//! let executor = SystemExecutor::from_config(&config);
//! let mut controller = DaemonController::from_config(config, executor)?;
//!
//! let outcome = controller.run_project(JoinParameters::new("10.0.0.5", 2377, "SWMTKN-1-abc"))?;
//! if !outcome.is_success() {
//!     eprintln!("join refused: {}", outcome.stderr());
//! }
//! # Ok(())
//! # }
//! ```

use tracing::{debug, info, warn};

use dockwarden_config::Config;

use crate::command::DaemonCommand;
use crate::error::ControllerError;
use crate::executor::CommandExecutor;
use crate::outcome::{JOINED_BANNER, LEFT_BANNER, Outcome};
use crate::platform::Platform;
use crate::project::{JoinParameters, SwarmProject};
use crate::state::ControllerState;

/// Tracing target for controller operations.
const CONTROLLER_TARGET: &str = "dockwarden::controller";

/// Controls one host's container runtime daemon through its CLI.
#[derive(Debug)]
pub struct DaemonController<E, P = JoinParameters> {
    config: Config,
    platform: Platform,
    executor: E,
    availability: Option<bool>,
    current_project: Option<P>,
}

impl<E, P> DaemonController<E, P> {
    /// Creates a controller for an explicit platform. No probe runs until the
    /// first operation, so the state starts as [`ControllerState::Unknown`].
    #[must_use]
    pub const fn new(config: Config, platform: Platform, executor: E) -> Self {
        Self {
            config,
            platform,
            executor,
            availability: None,
            current_project: None,
        }
    }

    /// Creates a controller for the platform the process runs on.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnsupportedPlatform`] on hosts that are
    /// neither Unix nor Windows.
    pub fn from_config(config: Config, executor: E) -> Result<Self, ControllerError> {
        let platform = Platform::detect()?;
        Ok(Self::new(config, platform, executor))
    }

    /// Resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Platform whose service manager restarts the daemon.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Executor used to run commands.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Result of the most recent probe, `None` before the first one.
    #[must_use]
    pub const fn availability(&self) -> Option<bool> {
        self.availability
    }

    /// Project recorded by the last successful [`run_project`](Self::run_project).
    ///
    /// A successful leave keeps the project unless
    /// `clear_project_on_leave` is configured.
    #[must_use]
    pub const fn current_project(&self) -> Option<&P> {
        self.current_project.as_ref()
    }

    /// Current position in the availability/membership state machine.
    #[must_use]
    pub const fn state(&self) -> ControllerState {
        ControllerState::derive(self.availability, self.current_project.is_some())
    }

    fn tool(&self) -> &str {
        self.config.tool_binary().as_str()
    }
}

impl<E, P> DaemonController<E, P>
where
    E: CommandExecutor,
    P: SwarmProject,
{
    /// Checks whether the runtime is installed and responsive.
    ///
    /// Runs `<tool> -v` and reports `true` iff stdout begins with the
    /// configured version banner. Launch failures and timeouts count as
    /// unavailable. The result is recorded for [`state`](Self::state).
    pub fn probe(&mut self) -> bool {
        let command = DaemonCommand::version_query(self.tool());
        let available = match self.executor.run(&command) {
            Ok(output) => output.stdout().starts_with(self.config.version_banner()),
            Err(error) => {
                debug!(target: CONTROLLER_TARGET, %error, "availability probe failed");
                false
            }
        };

        if self.availability != Some(available) {
            info!(
                target: CONTROLLER_TARGET,
                tool = self.tool(),
                available,
                "runtime availability changed"
            );
        }
        self.availability = Some(available);
        available
    }

    /// Joins the swarm led by `address:port` as a worker.
    ///
    /// Succeeds iff stdout begins with
    /// [`JOINED_BANNER`](crate::outcome::JOINED_BANNER). The project is not
    /// recorded; use [`run_project`](Self::run_project) for that.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::RuntimeUnavailable`] if the guarding probe
    /// fails, [`ControllerError::InvalidJoinParameter`] for unsafe
    /// parameters, or an executor error if the command cannot run.
    pub fn join(&mut self, address: &str, port: u16, token: &str) -> Result<Outcome, ControllerError> {
        self.ensure_available()?;

        let command = DaemonCommand::swarm_join(self.tool(), address, port, token)?;
        let output = self.executor.run(&command)?;
        let outcome = Outcome::expecting_banner(output, JOINED_BANNER);
        self.report(&command, &outcome);
        Ok(outcome)
    }

    /// Joins the project's swarm and, on success, records it as the active
    /// project, replacing any previous one.
    ///
    /// # Errors
    ///
    /// As for [`join`](Self::join).
    pub fn run_project(&mut self, project: P) -> Result<Outcome, ControllerError> {
        let outcome = self.join(project.address(), project.port(), project.token())?;
        if outcome.is_success() {
            info!(
                target: CONTROLLER_TARGET,
                address = project.address(),
                port = project.port(),
                "recorded active project"
            );
            self.current_project = Some(project);
        }
        Ok(outcome)
    }

    /// Leaves the current swarm, forcing the departure when `force` is set.
    ///
    /// Succeeds iff stdout begins with
    /// [`LEFT_BANNER`](crate::outcome::LEFT_BANNER), whichever variant ran.
    /// The active project is kept unless `clear_project_on_leave` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::RuntimeUnavailable`] if the guarding probe
    /// fails, or an executor error if the command cannot run.
    pub fn leave(&mut self, force: bool) -> Result<Outcome, ControllerError> {
        self.ensure_available()?;

        let command = DaemonCommand::swarm_leave(self.tool(), force);
        let output = self.executor.run(&command)?;
        let outcome = Outcome::expecting_banner(output, LEFT_BANNER);
        self.report(&command, &outcome);

        if outcome.is_success()
            && self.config.clear_project_on_leave()
            && self.current_project.take().is_some()
        {
            info!(target: CONTROLLER_TARGET, "cleared active project after leave");
        }
        Ok(outcome)
    }

    /// Restarts the daemon through the host service manager.
    ///
    /// The output and exit code of stop and start are ignored, but a failure
    /// to run either aborts the restart. The restart counts as successful iff
    /// `<tool> ps` afterwards does not print output starting with `error`
    /// (any case). Only a daemon on the local host can be restarted.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::RuntimeUnavailable`] if the guarding probe
    /// fails, or the executor's error if the stop, start or verifying listing
    /// command cannot be run to completion.
    pub fn restart(&mut self) -> Result<Outcome, ControllerError> {
        self.ensure_available()?;

        let service = match self.platform {
            Platform::Posix => self.config.posix_service(),
            Platform::Windows => self.config.windows_service(),
        };
        self.run_unchecked(&DaemonCommand::service_stop(self.platform, service))?;
        self.run_unchecked(&DaemonCommand::service_start(self.platform, service))?;

        let command = DaemonCommand::list_containers(self.tool());
        let output = self.executor.run(&command)?;
        let outcome = Outcome::rejecting_error_prefix(output);
        self.report(&command, &outcome);
        Ok(outcome)
    }

    /// Re-probes the runtime and refuses to continue when it is unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::RuntimeUnavailable`] when the probe fails.
    pub fn ensure_available(&mut self) -> Result<(), ControllerError> {
        if self.probe() {
            return Ok(());
        }
        warn!(
            target: CONTROLLER_TARGET,
            tool = self.tool(),
            "runtime unavailable, refusing to run command"
        );
        Err(ControllerError::RuntimeUnavailable {
            tool: self.tool().to_owned(),
        })
    }

    /// Runs `command` without classifying what it printed.
    fn run_unchecked(&self, command: &DaemonCommand) -> Result<(), ControllerError> {
        let output = self.executor.run(command).inspect_err(|error| {
            warn!(
                target: CONTROLLER_TARGET,
                %command,
                %error,
                "restart step could not run, aborting restart"
            );
        })?;
        debug!(
            target: CONTROLLER_TARGET,
            %command,
            exit_code = output.exit_code(),
            "restart step finished"
        );
        Ok(())
    }

    fn report(&self, command: &DaemonCommand, outcome: &Outcome) {
        if outcome.is_success() {
            debug!(target: CONTROLLER_TARGET, %command, "command succeeded");
        } else {
            warn!(
                target: CONTROLLER_TARGET,
                %command,
                exit_code = outcome.exit_code(),
                stdout = outcome.stdout().trim(),
                stderr = outcome.stderr().trim(),
                "command reported failure"
            );
        }
    }
}
