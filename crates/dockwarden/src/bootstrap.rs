//! Controller bootstrap orchestration.
//!
//! Loads configuration, installs telemetry, detects the host platform and
//! performs the initial availability probe.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;
use tracing::info;

use dockwarden_config::Config;

use crate::controller::DaemonController;
use crate::error::ControllerError;
use crate::executor::CommandExecutor;
use crate::platform::Platform;
use crate::process::SystemExecutor;
use crate::project::SwarmProject;
use crate::telemetry::{GlobalTelemetry, TelemetryError, TelemetryInstaller};

/// Tracing target for bootstrap events.
const BOOTSTRAP_TARGET: &str = "dockwarden::bootstrap";

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader {
    /// Loads the controller configuration.
    ///
    /// # Errors
    ///
    /// Returns the loader's error when no valid configuration can be built.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`OrthoConfig::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The host platform has no restart procedure.
    #[error("unsupported host: {source}")]
    Platform {
        /// Underlying detection error.
        #[source]
        source: ControllerError,
    },
}

/// Bootstraps a controller driving real child processes.
///
/// # Errors
///
/// See [`bootstrap_with`].
pub fn bootstrap() -> Result<DaemonController<SystemExecutor>, BootstrapError> {
    bootstrap_with(
        &SystemConfigLoader,
        &GlobalTelemetry,
        SystemExecutor::from_config,
    )
}

/// Bootstraps a controller using the supplied collaborators.
///
/// `telemetry` is installed before anything else is logged and
/// `make_executor` receives the loaded configuration. The returned
/// controller has already probed the runtime once; an unavailable runtime is
/// not a bootstrap error.
///
/// # Errors
///
/// Returns [`BootstrapError`] when configuration, telemetry or platform
/// detection fails.
pub fn bootstrap_with<E, P, F>(
    loader: &dyn ConfigLoader,
    telemetry: &dyn TelemetryInstaller,
    make_executor: F,
) -> Result<DaemonController<E, P>, BootstrapError>
where
    E: CommandExecutor,
    P: SwarmProject,
    F: FnOnce(&Config) -> E,
{
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    telemetry
        .install(&config)
        .map_err(|source| BootstrapError::Telemetry { source })?;
    let platform = Platform::detect().map_err(|source| BootstrapError::Platform { source })?;

    let executor = make_executor(&config);
    let mut controller = DaemonController::new(config, platform, executor);
    let available = controller.probe();
    info!(
        target: BOOTSTRAP_TARGET,
        %platform,
        available,
        "controller bootstrapped"
    );
    Ok(controller)
}
