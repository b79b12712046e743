//! Container runtime daemon control for a single host.
//!
//! The `dockwarden` crate drives an already-installed container runtime CLI
//! (`docker` by default) to answer three questions and perform three
//! actions: is the runtime usable, join a swarm as a worker, leave it, and
//! restart the local daemon through the host service manager.
//!
//! The runtime reports success only in the text it prints, so every
//! operation classifies captured stdout against known banners and returns an
//! [`Outcome`] carrying the verdict plus the raw stdout, stderr and exit
//! code. Environment failures (runtime missing, launch errors, timeouts)
//! surface as [`ControllerError`].
//!
//! # Architecture
//!
//! [`DaemonController`] owns the availability flag and the active project.
//! It builds [`DaemonCommand`] argument vectors and hands them to a
//! [`CommandExecutor`]; [`SystemExecutor`] runs them as child processes with
//! a bounded wait, while tests substitute scripted executors.
//!
//! # Example
//!
//! ```rust,no_run
//! use dockwarden::{JoinParameters, bootstrap};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut controller = bootstrap::bootstrap()?;
//! if controller.probe() {
//!     let joined = controller.run_project(JoinParameters::new("10.0.0.5", 2377, "SWMTKN-1-abc"))?;
//!     assert!(joined.is_success());
//! }
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod command;
pub mod controller;
pub mod error;
pub mod executor;
pub mod outcome;
pub mod platform;
pub mod process;
pub mod project;
pub mod state;
pub mod telemetry;

#[cfg(test)]
mod tests;

pub use self::command::DaemonCommand;
pub use self::controller::DaemonController;
pub use self::error::ControllerError;
pub use self::executor::{CommandExecutor, CommandOutput};
pub use self::outcome::Outcome;
pub use self::platform::Platform;
pub use self::process::SystemExecutor;
pub use self::project::{JoinParameters, SwarmProject};
pub use self::state::ControllerState;
