//! Structured telemetry for hosts embedding the controller.
//!
//! The subscriber is assembled from [`Config::log_filter`] and
//! [`Config::log_format`] by [`build_subscriber`], which accepts any writer so
//! the rendered events can be inspected. [`GlobalTelemetry`] installs it as the
//! process-wide default behind the [`TelemetryInstaller`] seam used by
//! bootstrap.

use std::io::{self, IsTerminal};

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter, time::UtcTime};

use dockwarden_config::{Config, LogFormat};

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter '{filter}': {reason}")]
    Filter {
        /// Filter expression as configured.
        filter: String,
        /// Parser message.
        reason: String,
    },
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(#[from] SetGlobalDefaultError),
}

/// Installs whatever collects the controller's tracing events.
pub trait TelemetryInstaller {
    /// Installs telemetry for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError`] when the configuration cannot be turned
    /// into a subscriber or the subscriber cannot be installed.
    fn install(&self, config: &Config) -> Result<(), TelemetryError>;
}

/// Installs the process-wide default subscriber once.
///
/// Later installs succeed without touching the global state, even when their
/// configuration differs.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalTelemetry;

impl TelemetryInstaller for GlobalTelemetry {
    fn install(&self, config: &Config) -> Result<(), TelemetryError> {
        INSTALLED
            .get_or_try_init(|| {
                let subscriber = build_subscriber(config, io::stderr, io::stderr().is_terminal())?;
                tracing::subscriber::set_global_default(subscriber)?;
                Ok(())
            })
            .copied()
    }
}

/// Builds a subscriber that writes events for `config` to `writer`.
///
/// `ansi` enables colour in the compact format.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] for an unparsable `log_filter`.
pub fn build_subscriber<W>(
    config: &Config,
    writer: W,
    ansi: bool,
) -> Result<Box<dyn Subscriber + Send + Sync>, TelemetryError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(config.log_filter()).map_err(|error| TelemetryError::Filter {
        filter: config.log_filter().to_owned(),
        reason: error.to_string(),
    })?;
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_timer(UtcTime::rfc_3339());

    Ok(match config.log_format() {
        LogFormat::Json => Box::new(builder.json().flatten_event(true).finish()),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    })
}
